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

//! the externally supplied constants of the collision avoidance logic.
//! All values are plain f64 in the units noted at the respective field (ft, fpm, nm, kt, seconds), which
//! is what the threshold arithmetic uses internally. The `uom` typed boundary is in `OwnState` and `RawContact`

use std::{fs, path::Path};
use serde::{Serialize,Deserialize};

use crate::errors::{OdinTcasError,Result,config_error};

/// which altitude a sensitivity band is matched against
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
pub enum AltReference { Radio, Pressure }

/// half-open altitude interval (min,max] in ft
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct AltBand {
    pub reference: AltReference,
    pub min: f64,
    pub max: f64,
}

impl AltBand {
    pub fn contains (&self, radio_alt: f64, pressure_alt: f64)->bool {
        let alt = match self.reference {
            AltReference::Radio => radio_alt,
            AltReference::Pressure => pressure_alt,
        };
        alt > self.min && alt <= self.max
    }
}

/// the thresholds of one sensitivity level. Levels without RA capability (1: standby, 2: TA only)
/// have zero RA thresholds, which can never be undercut
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct SensitivityParams {
    pub level: u8,
    pub band: Option<AltBand>, // None for levels that are not selected by altitude

    pub tau_ta: f64,  // s
    pub tau_ra: f64,  // s
    pub dmod_ta: f64, // nm
    pub dmod_ra: f64, // nm
    pub zthr_ta: f64, // ft
    pub zthr_ra: f64, // ft
    pub tvthr: f64,   // s - vertical tau threshold used at low own vertical speeds
    pub alim: f64,    // ft
}

impl SensitivityParams {
    fn new (level: u8, band: Option<AltBand>, tau: [f64;2], dmod: [f64;2], zthr: [f64;2], tvthr: f64, alim: f64)->Self {
        SensitivityParams {
            level, band,
            tau_ta: tau[0], tau_ra: tau[1],
            dmod_ta: dmod[0], dmod_ra: dmod[1],
            zthr_ta: zthr[0], zthr_ra: zthr[1],
            tvthr, alim
        }
    }

    pub fn has_ra (&self)->bool { self.tau_ra > 0.0 && self.alim > 0.0 }
}

/// radio altitude floors (ft) below which advisory classes are suppressed, plus the pressure altitude
/// ceiling above which climb RAs are suppressed
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct InhibitionBands {
    pub aural_ta_below: f64,
    pub all_ra_below: f64,
    pub desc_ra_below: f64,
    pub incr_desc_ra_below: f64,
    pub climb_ra_above: f64, // pressure altitude
}

/// elliptical horizontal gate (nm, relative to own heading) and vertical gate (ft) for displayed traffic
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct RangeGate {
    pub forward: f64,
    pub side: f64,
    pub back: f64,
    pub alt: f64,
}

/// relative altitude windows (min,max) in ft for the traffic display threat settings
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct ThreatWindows {
    pub threat: (f64,f64),
    pub all: (f64,f64),
    pub above: (f64,f64),
    pub below: (f64,f64),
}

/// constants of the own-ship response model used to predict separation at CPA
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct TrajectoryModel {
    pub initial_delay: f64,  // s - pilot response delay for a first RA
    pub initial_accel: f64,  // ft/s² (~0.25g)
    pub followup_delay: f64, // s - response delay for strengthening/reversal
    pub followup_accel: f64, // ft/s² (~0.35g)
    pub nominal_rate: f64,   // fpm of climb/descend RAs
    pub increase_rate: f64,  // fpm of increase RAs
    pub crossing_margin: f64, // ft - altitude offset above which a maneuver counts as crossing
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct TcasConfig {
    pub refresh_interval: f64,       // s between logic updates
    pub memory_max: usize,           // max number of tracks we keep
    pub max_displayed: usize,        // max number of contacts we publish
    pub ta_expiration_delay: f64,    // s a TA is held after it stops qualifying
    pub min_ra_duration: f64,        // s before an RA can be dropped, weakened or reversed
    pub min_reversal_cpa_time: f64,  // s to CPA below which no reversal is issued
    pub vol_boost: f64,              // inflation of TA thresholds that keeps an RA alive close to CPA
    pub closure_rate_threshold: f64, // kt - min closure rate for the boosted RA hold
    pub proximity_range: f64,        // nm
    pub proximity_alt: f64,          // ft
    pub low_vs_threshold: f64,       // fpm - own vertical speed up to which TVTHR is used
    pub ground_clearance: f64,       // ft above terrain under which contacts count as on ground
    pub fault_alt_disagreement: f64, // ft between redundant altitude sources that raises a fault
    pub trend_threshold: f64,        // fpm for published climb/descend trend arrows

    pub trajectory: TrajectoryModel,
    pub sensitivity: Vec<SensitivityParams>,
    pub inhibition: InhibitionBands,
    pub range_gate: RangeGate,
    pub threat_windows: ThreatWindows,
}

impl Default for TcasConfig {
    fn default()->Self {
        use AltReference::*;
        let band = |reference, min, max| Some( AltBand{ reference, min, max });

        TcasConfig {
            refresh_interval: 1.0,
            memory_max: 40,
            max_displayed: 8,
            ta_expiration_delay: 10.0,
            min_ra_duration: 10.0,
            min_reversal_cpa_time: 4.0,
            vol_boost: 1.25,
            closure_rate_threshold: -40.0,
            proximity_range: 6.0,
            proximity_alt: 1200.0,
            low_vs_threshold: 600.0,
            ground_clearance: 380.0,
            fault_alt_disagreement: 300.0,
            trend_threshold: 500.0,

            trajectory: TrajectoryModel {
                initial_delay: 5.0,
                initial_accel: 8.0,
                followup_delay: 2.5,
                followup_accel: 10.7,
                nominal_rate: 1500.0,
                increase_rate: 2500.0,
                crossing_margin: 100.0,
            },

            //                          level band                              tau [TA,RA]   dmod [TA,RA]  zthr [TA,RA]     tvthr alim
            sensitivity: vec![
                SensitivityParams::new( 1, None,                                [ 0.0, 0.0],  [0.0, 0.0],   [   0.0,   0.0],  0.0,   0.0),
                SensitivityParams::new( 2, None,                                [20.0, 0.0],  [0.30,0.0],   [ 850.0,   0.0],  0.0,   0.0),
                SensitivityParams::new( 3, band(Radio, 1000.0, 2350.0),         [25.0,15.0],  [0.33,0.20],  [ 850.0, 600.0], 15.0, 300.0),
                SensitivityParams::new( 4, band(Pressure, 2350.0, 5000.0),      [30.0,20.0],  [0.48,0.35],  [ 850.0, 600.0], 18.0, 300.0),
                SensitivityParams::new( 5, band(Pressure, 5000.0, 10000.0),     [40.0,25.0],  [0.75,0.55],  [ 850.0, 600.0], 20.0, 350.0),
                SensitivityParams::new( 6, band(Pressure, 10000.0, 20000.0),    [45.0,30.0],  [1.00,0.80],  [ 850.0, 600.0], 22.0, 400.0),
                SensitivityParams::new( 7, band(Pressure, 20000.0, 42000.0),    [48.0,35.0],  [1.30,1.10],  [ 850.0, 700.0], 25.0, 600.0),
                SensitivityParams::new( 8, None,                                [48.0,35.0],  [1.30,1.10],  [1200.0, 800.0], 25.0, 700.0),
            ],

            inhibition: InhibitionBands {
                aural_ta_below: 500.0,
                all_ra_below: 1000.0,
                desc_ra_below: 1100.0,
                incr_desc_ra_below: 1550.0,
                climb_ra_above: 39000.0,
            },

            range_gate: RangeGate { forward: 30.0, side: 20.0, back: 10.0, alt: 9900.0 },

            threat_windows: ThreatWindows {
                threat: (-2700.0, 2700.0),
                all:    (-2700.0, 2700.0),
                above:  (-2700.0, 9900.0),
                below:  (-9900.0, 2700.0),
            },
        }
    }
}

impl TcasConfig {
    pub fn from_ron_file<P: AsRef<Path>> (path: P)->Result<Self> {
        let data = fs::read( path.as_ref())?;
        Self::from_ron_bytes( data.as_slice())
    }

    pub fn from_ron_bytes (data: &[u8])->Result<Self> {
        let config: TcasConfig = ron::de::from_bytes( data)?;
        config.validate()?;
        Ok(config)
    }

    /// check the invariants the logic relies on: a complete sensitivity table with monotonic levels and
    /// non-degenerate intervals
    pub fn validate (&self)->Result<()> {
        if self.refresh_interval <= 0.0 { return Err( config_error!("refresh_interval must be positive: {}", self.refresh_interval)) }
        if self.memory_max == 0 { return Err( config_error!("memory_max must be positive")) }
        if self.vol_boost < 1.0 { return Err( config_error!("vol_boost must not shrink thresholds: {}", self.vol_boost)) }

        let t = &self.trajectory;
        if t.initial_accel <= 0.0 || t.followup_accel <= 0.0 {
            return Err( config_error!("trajectory accelerations must be positive"))
        }

        for level in 1..=8u8 {
            match self.sensitivity_params(level) {
                Some(p) => {
                    if let Some(band) = &p.band {
                        if band.min >= band.max { return Err( config_error!("empty altitude band for sensitivity level {}", level)) }
                    }
                    if p.dmod_ra > p.dmod_ta || p.tau_ra > p.tau_ta {
                        return Err( config_error!("RA thresholds exceed TA thresholds for sensitivity level {}", level))
                    }
                }
                None => return Err( config_error!("missing sensitivity level {}", level))
            }
        }
        if self.sensitivity.len() != 8 {
            return Err( config_error!("expected 8 sensitivity levels, got {}", self.sensitivity.len()))
        }

        let g = &self.range_gate;
        if g.forward <= 0.0 || g.side <= 0.0 || g.back <= 0.0 {
            return Err( config_error!("range gate semi-axes must be positive"))
        }

        Ok(())
    }

    pub fn sensitivity_params (&self, level: u8)->Option<&SensitivityParams> {
        self.sensitivity.iter().find( |p| p.level == level)
    }
}
