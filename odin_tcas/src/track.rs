/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::{fmt, cmp::Ordering, sync::Arc};
use serde::{Serialize,Deserialize};
use strum::Display;
use tracing::{debug,trace};

use crate::{
    TcasComponent,
    config::{SensitivityParams,TcasConfig},
    geo::{self,RelativePosition},
    telemetry::{OwnState,RawContact}
};

/// threat level of a contact. The order matters - classification takes the minimum of range and altitude tests
#[derive(Serialize,Deserialize,Debug,Display,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Default)]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum Intrusion {
    #[default]
    None,
    Proximity,
    Ta,
    Ra,
}

/// non-negative time-to-threshold, or infinity if the raw value is negative or undefined (diverging traffic)
#[inline]
pub fn positive_or_infinite (tau: f64)->f64 {
    if tau >= 0.0 { tau } else { f64::INFINITY }
}

/// modified range tau in seconds for range (nm), threshold DMOD (nm) and closure rate (kt)
#[inline]
pub fn raw_range_tau (range: f64, dmod: f64, closure_rate: f64)->f64 {
    (range - dmod*dmod/range) / closure_rate * 3600.0
}

/// the persistent state we keep for each contact
#[derive(Debug,Clone)]
pub struct Track {
    pub id: Arc<String>, // in an Arc so that we can pass it on to display records without heap allocation
    pub alive: bool,

    pub lat: f64,
    pub lon: f64,
    pub alt: f64,            // ft
    pub heading: f64,        // degrees
    pub vertical_speed: f64, // fpm

    pub relative_alt: f64,        // ft, positive if contact is above own-ship
    pub slant_distance: f64,      // nm
    pub horizontal_distance: f64, // nm
    pub rel_pos: RelativePosition,
    pub closure_rate: f64,        // kt, positive if closing

    pub ta_tau: f64, // s
    pub ra_tau: f64, // s
    pub v_tau: f64,  // s

    pub intrusion: Intrusion,
    pub is_displayed: bool,
    pub on_ground: bool,

    pub ta_expiring: bool,
    pub secs_since_last_ta: f64,
}

impl Track {
    pub fn new (id: &str, lat: f64, lon: f64, alt: f64, heading: f64, own: &OwnState)->Self {
        let own_alt = own.pressure_alt_ft();
        let horizontal_distance = geo::great_circle_distance( own.lat, own.lon, lat, lon);

        Track {
            id: Arc::new(id.to_string()),
            alive: true,
            lat, lon, alt, heading,
            vertical_speed: 0.0,
            relative_alt: alt - own_alt,
            slant_distance: geo::slant_distance( horizontal_distance, alt - own_alt),
            horizontal_distance,
            rel_pos: RelativePosition::default(),
            closure_rate: 0.0,
            ta_tau: f64::INFINITY,
            ra_tau: f64::INFINITY,
            v_tau: f64::INFINITY,
            intrusion: Intrusion::None,
            is_displayed: false,
            on_ground: false,
            ta_expiring: false,
            secs_since_last_ta: 0.0
        }
    }

    /// update kinematics and timing metrics from a new position report that is `dt` seconds after the last one
    pub fn update (&mut self, lat: f64, lon: f64, alt: f64, heading: f64, own: &OwnState, params: &SensitivityParams, dt: f64) {
        let own_alt = own.pressure_alt_ft();
        let horizontal_distance = geo::great_circle_distance( own.lat, own.lon, lat, lon);
        let slant_distance = geo::slant_distance( horizontal_distance, alt - own_alt);

        if dt > 0.0 {
            self.vertical_speed = (alt - self.alt) / dt * 60.0;
            self.closure_rate = (self.slant_distance - slant_distance) / dt * 3600.0;
        }

        self.lat = lat;
        self.lon = lon;
        self.alt = alt;
        self.heading = heading;
        self.relative_alt = alt - own_alt;
        self.horizontal_distance = horizontal_distance;
        self.slant_distance = slant_distance;

        self.update_taus( own.vs_fpm(), params);
    }

    pub fn update_taus (&mut self, own_vs: f64, params: &SensitivityParams) {
        let ra_tau = raw_range_tau( self.slant_distance, params.dmod_ra, self.closure_rate);
        if ra_tau >= 0.0 {
            self.ra_tau = ra_tau;
            self.ta_tau = positive_or_infinite( raw_range_tau( self.slant_distance, params.dmod_ta, self.closure_rate));
        } else { // diverging (or undefined)
            self.ra_tau = f64::INFINITY;
            self.ta_tau = f64::INFINITY;
        }

        self.v_tau = positive_or_infinite( self.relative_alt / (own_vs - self.vertical_speed) * 60.0);
    }

    /// time to closest point of approach used for trajectory predictions. Tracks without a finite range tau
    /// are either inside DMOD or diverging, i.e. at or past CPA
    #[inline]
    pub fn time_to_cpa (&self)->f64 {
        if self.ra_tau.is_finite() { self.ra_tau } else { 0.0 }
    }

    /// predicted contact altitude at CPA
    #[inline]
    pub fn alt_at_cpa (&self)->f64 {
        self.alt + (self.vertical_speed / 60.0) * self.time_to_cpa()
    }

    /// the urgency order we use for pruning and display: ra_tau, then ta_tau, then slant distance
    pub fn cmp_urgency (&self, other: &Track)->Ordering {
        self.ra_tau.total_cmp( &other.ra_tau)
            .then_with( || self.ta_tau.total_cmp( &other.ta_tau))
            .then_with( || self.slant_distance.total_cmp( &other.slant_distance))
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Track( id: {}, {}, rng: {:.2}, rel_alt: {:.0}, vs: {:.0}, closure: {:.0}, taTau: {:.1}, raTau: {:.1}, vTau: {:.1} )",
            self.id, self.intrusion, self.slant_distance, self.relative_alt, self.vertical_speed, self.closure_rate,
            self.ta_tau, self.ra_tau, self.v_tau)
    }
}

pub struct TrackInput<'a> {
    pub contacts: &'a [RawContact],
    pub own: &'a OwnState,
    pub params: &'a SensitivityParams,
    pub dt: f64, // s since last ingest
}

/// the persistent track store. Tracks are created on first sighting, updated while sighted and purged as
/// soon as they are missing from a telemetry snapshot
pub struct TrackManager {
    config: Arc<TcasConfig>,
    tracks: Vec<Track>,
}

impl TrackManager {
    pub fn new (config: Arc<TcasConfig>)->Self {
        let tracks = Vec::with_capacity( config.memory_max);
        TrackManager { config, tracks }
    }

    pub fn tracks (&self)->&[Track] { self.tracks.as_slice() }
    pub fn tracks_mut (&mut self)->&mut [Track] { self.tracks.as_mut_slice() }
    pub fn len (&self)->usize { self.tracks.len() }
    pub fn is_empty (&self)->bool { self.tracks.is_empty() }

    pub fn get (&self, id: &str)->Option<&Track> {
        self.tracks.iter().find( |t| t.id.as_str() == id)
    }

    /// RA level tracks in ascending ra_tau order
    pub fn ra_tracks (&self)->Vec<&Track> {
        let mut list: Vec<&Track> = self.tracks.iter().filter( |t| t.intrusion == Intrusion::Ra).collect();
        list.sort_by( |a,b| a.ra_tau.total_cmp( &b.ra_tau));
        list
    }

    pub fn count_alive (&self, intrusion: Intrusion)->usize {
        self.tracks.iter().filter( |t| t.alive && t.intrusion == intrusion).count()
    }

    /// process a telemetry snapshot. Returns the number of tracks we keep
    pub fn ingest (&mut self, contacts: &[RawContact], own: &OwnState, params: &SensitivityParams, dt: f64)->usize {
        for track in self.tracks.iter_mut() {
            track.alive = false;
        }

        for contact in contacts {
            if contact.is_no_data() { continue }
            let Some((lat,lon,alt)) = contact.position() else {
                trace!("skipping incomplete {}", contact);
                continue
            };
            let heading = contact.heading_or_zero();

            let idx = match self.tracks.iter().position( |t| t.id.as_str() == contact.id) {
                Some(idx) => idx,
                None => {
                    self.tracks.push( Track::new( &contact.id, lat, lon, alt, heading, own));
                    self.tracks.len() - 1
                }
            };

            let track = &mut self.tracks[idx];
            track.alive = true;
            track.update( lat, lon, alt, heading, own, params, dt);
        }

        let n_before = self.tracks.len();
        self.tracks.retain( |t| t.alive);
        if self.tracks.len() < n_before {
            debug!("dropped {} tracks", n_before - self.tracks.len());
        }

        if self.tracks.len() > self.config.memory_max {
            self.tracks.sort_by( |a,b| a.ra_tau.total_cmp( &b.ra_tau));
            self.tracks.truncate( self.config.memory_max);
        }

        self.tracks.len()
    }
}

impl TcasComponent for TrackManager {
    type Input<'a> = TrackInput<'a>;
    type Output = usize;

    fn configure (&mut self, config: Arc<TcasConfig>) { self.config = config; }

    fn tick (&mut self, input: Self::Input<'_>)->usize {
        self.ingest( input.contacts, input.own, input.params, input.dt)
    }

    fn reset (&mut self) { self.tracks.clear(); }
}
