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

use std::sync::Arc;
use serde::{Serialize,Deserialize};
use strum::Display;

use crate::{
    advisory::ResAdvisory,
    state::{AdvisoryState,RaGuidance},
    status::TcasStatus,
    track::{Intrusion,Track}
};

#[derive(Serialize,Deserialize,Debug,Display,Clone,Copy,PartialEq,Eq,Default)]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum VerticalTrend {
    #[default]
    Level,
    Climbing,
    Descending,
}

impl VerticalTrend {
    pub fn from_vs (vs: f64, threshold: f64)->Self {
        if vs >= threshold {
            VerticalTrend::Climbing
        } else if vs <= -threshold {
            VerticalTrend::Descending
        } else {
            VerticalTrend::Level
        }
    }
}

/// what we publish about a contact
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct DisplayTraffic {
    pub id: Arc<String>,
    pub intrusion: Intrusion,
    pub right: f64,   // nm relative to own heading
    pub ahead: f64,   // nm relative to own heading
    pub rel_alt: i32, // in 100 ft units
    pub trend: VerticalTrend,
    pub slant_distance: f64, // nm
}

impl DisplayTraffic {
    pub fn from_track (track: &Track, trend_threshold: f64)->Self {
        DisplayTraffic {
            id: track.id.clone(),
            intrusion: track.intrusion,
            right: track.rel_pos.right,
            ahead: track.rel_pos.ahead,
            rel_alt: (track.relative_alt / 100.0).round() as i32,
            trend: VerticalTrend::from_vs( track.vertical_speed, trend_threshold),
            slant_distance: track.slant_distance,
        }
    }
}

/// the alive and displayed tracks in (ra_tau, ta_tau, slant distance) order, capped at `max_displayed`
pub fn project_traffic (tracks: &[Track], max_displayed: usize, trend_threshold: f64)->Vec<DisplayTraffic> {
    let mut list: Vec<&Track> = tracks.iter().filter( |t| t.alive && t.is_displayed).collect();
    list.sort_by( |a,b| a.cmp_urgency(b));
    list.iter().take( max_displayed).map( |t| DisplayTraffic::from_track( t, trend_threshold)).collect()
}

/// everything we publish for a logic tick
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct TcasReport {
    pub state: AdvisoryState,
    pub advisory: Option<ResAdvisory>,
    pub guidance: Option<RaGuidance>,
    pub traffic: Vec<DisplayTraffic>,
    pub status: TcasStatus,
}

impl TcasReport {
    pub fn standby (status: TcasStatus)->Self {
        TcasReport { state: AdvisoryState::None, advisory: None, guidance: None, traffic: Vec::new(), status }
    }

    pub fn n_traffic (&self, intrusion: Intrusion)->usize {
        self.traffic.iter().filter( |t| t.intrusion == intrusion).count()
    }
}
