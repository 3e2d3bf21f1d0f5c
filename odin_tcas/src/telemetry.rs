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

//! the input side of the engine: own-ship state and contact snapshots as delivered by the host platform.
//! Telemetry is polled without blocking - a fetch that has not completed yet just means "no update this tick"

use std::fmt;
use serde::{Serialize,Deserialize};
use tokio::sync::mpsc::{self, error::TryRecvError};
use uom::si::{f64::{Length,Velocity}, length::foot, velocity::foot_per_minute};

use crate::errors::OdinTcasError;

/// TCAS control panel mode
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
pub enum TcasMode { Stby, Ta, TaRa }

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
pub enum XpdrMode { Stby, On }

/// traffic display selection that determines the vertical window of displayed contacts
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
pub enum ThreatSetting { Threat, All, Above, Below }

/// own-ship data for one tick. Owned by the driver, read-only for all engine components
#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct OwnState {
    pub lat: f64, // degrees
    pub lon: f64, // degrees
    pub pressure_alt: Length,
    pub radio_alt: Length,
    pub vertical_speed: Velocity,
    pub true_heading: f64, // degrees

    // the redundant air data sources. None if the source is not in normal operation
    pub adr_alt: Option<Length>,
    pub adr_alt_standby: Option<Length>,

    pub tcas_mode: TcasMode,
    pub xpdr_mode: XpdrMode,
    pub threat_setting: ThreatSetting,
    pub gpws_warning: bool,
    pub slew_active: bool,
    pub ground_phase: bool, // pre-flight / post-landing phases in which no status is raised
}

impl OwnState {
    /// own-ship in TA/RA mode with consistent air data sources
    pub fn new (lat: f64, lon: f64, pressure_alt_ft: f64, radio_alt_ft: f64, vs_fpm: f64, true_heading: f64)->Self {
        let pressure_alt = Length::new::<foot>( pressure_alt_ft);
        OwnState {
            lat, lon,
            pressure_alt,
            radio_alt: Length::new::<foot>( radio_alt_ft),
            vertical_speed: Velocity::new::<foot_per_minute>( vs_fpm),
            true_heading,
            adr_alt: Some(pressure_alt),
            adr_alt_standby: Some(pressure_alt),
            tcas_mode: TcasMode::TaRa,
            xpdr_mode: XpdrMode::On,
            threat_setting: ThreatSetting::All,
            gpws_warning: false,
            slew_active: false,
            ground_phase: false,
        }
    }

    #[inline] pub fn pressure_alt_ft (&self)->f64 { self.pressure_alt.get::<foot>() }
    #[inline] pub fn radio_alt_ft (&self)->f64 { self.radio_alt.get::<foot>() }
    #[inline] pub fn vs_fpm (&self)->f64 { self.vertical_speed.get::<foot_per_minute>() }

    /// terrain elevation below own-ship
    #[inline] pub fn ground_alt_ft (&self)->f64 { self.pressure_alt_ft() - self.radio_alt_ft() }

    pub fn is_standby (&self)->bool {
        self.tcas_mode == TcasMode::Stby || self.xpdr_mode == XpdrMode::Stby
    }
}

/// a contact snapshot as reported by the host. Any field might be missing
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct RawContact {
    pub id: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub alt: Option<Length>,
    pub heading: Option<f64>,
}

impl RawContact {
    pub fn new (id: impl ToString, lat: f64, lon: f64, alt_ft: f64, heading: f64)->Self {
        RawContact {
            id: id.to_string(),
            lat: Some(lat),
            lon: Some(lon),
            alt: Some( Length::new::<foot>(alt_ft)),
            heading: Some(heading)
        }
    }

    /// the host uses all-zero records as "no data" sentinel
    pub fn is_no_data (&self)->bool {
        fn is_blank (v: Option<f64>)->bool { v.map_or( true, |x| x == 0.0) }
        is_blank(self.lat) && is_blank(self.lon) && is_blank(self.alt.map(|a| a.get::<foot>())) && is_blank(self.heading)
    }

    /// (lat,lon,alt_ft) if all of them are present and finite
    pub fn position (&self)->Option<(f64,f64,f64)> {
        let lat = self.lat.filter(|x| x.is_finite())?;
        let lon = self.lon.filter(|x| x.is_finite())?;
        let alt = self.alt.map(|a| a.get::<foot>()).filter(|x| x.is_finite())?;
        Some((lat,lon,alt))
    }

    pub fn heading_or_zero (&self)->f64 { self.heading.filter(|x| x.is_finite()).unwrap_or(0.0) }
}

impl fmt::Display for RawContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "RawContact( id: {}", self.id)?;
        if let Some((lat,lon,alt)) = self.position() { write!( f, ", pos: [{lat:.5},{lon:.5}], alt: {alt:.0}")?; }
        if let Some(hdg) = self.heading { write!( f, ", hdg: {hdg:.0}")?; }
        write!( f, ")")
    }
}

/// result of a non-blocking telemetry fetch
#[derive(Debug)]
pub enum TelemetryPoll {
    Ready(Vec<RawContact>),
    Pending,
    Unavailable(OdinTcasError),
}

pub trait TelemetrySource {
    /// this must never block
    fn poll_contacts (&mut self)->TelemetryPoll;
}

/// telemetry source that receives contact snapshots from an async producer task.
/// If several snapshots arrived since the last poll only the latest one is used
pub struct ChannelTelemetrySource {
    rx: mpsc::Receiver<Vec<RawContact>>,
}

impl ChannelTelemetrySource {
    pub fn new (rx: mpsc::Receiver<Vec<RawContact>>)->Self { ChannelTelemetrySource { rx } }

    pub fn with_capacity (capacity: usize)->(mpsc::Sender<Vec<RawContact>>, Self) {
        let (tx,rx) = mpsc::channel(capacity);
        (tx, ChannelTelemetrySource::new(rx))
    }
}

impl TelemetrySource for ChannelTelemetrySource {
    fn poll_contacts (&mut self)->TelemetryPoll {
        let mut latest: Option<Vec<RawContact>> = None;
        loop {
            match self.rx.try_recv() {
                Ok(contacts) => latest = Some(contacts),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if latest.is_none() {
                        return TelemetryPoll::Unavailable( OdinTcasError::TelemetryError("telemetry channel closed".to_string()))
                    }
                    break
                }
            }
        }
        match latest {
            Some(contacts) => TelemetryPoll::Ready(contacts),
            None => TelemetryPoll::Pending
        }
    }
}
