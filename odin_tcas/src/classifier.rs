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
use tracing::{debug,trace};

use crate::{
    TcasComponent,
    config::{SensitivityParams,TcasConfig},
    geo::{self,RelativePosition},
    telemetry::{OwnState,ThreatSetting},
    track::{Intrusion,Track}
};

/// result of the range or altitude test before hysteresis is applied
fn range_test (track: &Track, params: &SensitivityParams, proximity_range: f64)->Intrusion {
    if track.ra_tau < params.tau_ra || track.slant_distance < params.dmod_ra {
        Intrusion::Ra
    } else if track.ta_tau < params.tau_ta || track.slant_distance < params.dmod_ta {
        Intrusion::Ta
    } else if track.horizontal_distance < proximity_range {
        Intrusion::Proximity
    } else {
        Intrusion::None
    }
}

fn altitude_test (track: &Track, params: &SensitivityParams, own_vs: f64, low_vs_threshold: f64, proximity_alt: f64)->Intrusion {
    let rel_alt = track.relative_alt.abs();
    let ra_vtau_threshold = if own_vs.abs() <= low_vs_threshold { params.tvthr } else { params.tau_ra };

    if track.v_tau < ra_vtau_threshold || rel_alt < params.zthr_ra {
        Intrusion::Ra
    } else if track.v_tau < params.tau_ta || rel_alt < params.zthr_ta {
        Intrusion::Ta
    } else if rel_alt < proximity_alt {
        Intrusion::Proximity
    } else {
        Intrusion::None
    }
}

/// the intrusion level a track would get without hysteresis
pub fn candidate_intrusion (track: &Track, params: &SensitivityParams, own_vs: f64, config: &TcasConfig)->Intrusion {
    if track.on_ground {
        Intrusion::None
    } else {
        let range = range_test( track, params, config.proximity_range);
        let alt = altitude_test( track, params, own_vs, config.low_vs_threshold, config.proximity_alt);
        range.min(alt)
    }
}

fn vertical_window (config: &TcasConfig, setting: ThreatSetting)->(f64,f64) {
    let w = &config.threat_windows;
    match setting {
        ThreatSetting::Threat => w.threat,
        ThreatSetting::All => w.all,
        ThreatSetting::Above => w.above,
        ThreatSetting::Below => w.below,
    }
}

pub struct ClassifierInput<'a> {
    pub own: &'a OwnState,
    pub params: &'a SensitivityParams,
    pub ra_elapsed: Option<f64>, // seconds since start of the active RA, None if there is none
    pub dt: f64,
}

/// assigns intrusion levels and display flags to tracks, with hysteresis that keeps TAs and RAs from flickering
pub struct ThreatClassifier {
    config: Arc<TcasConfig>,
}

impl ThreatClassifier {
    pub fn new (config: Arc<TcasConfig>)->Self {
        ThreatClassifier { config }
    }

    pub fn classify (&self, tracks: &mut [Track], input: &ClassifierInput)->Intrusion {
        let mut max_level = Intrusion::None;
        for track in tracks.iter_mut() {
            self.classify_track( track, input);
            max_level = max_level.max( track.intrusion);
        }
        max_level
    }

    pub fn classify_track (&self, track: &mut Track, input: &ClassifierInput) {
        let config = self.config.as_ref();
        let own = input.own;
        let params = input.params;

        track.on_ground = track.alt < own.ground_alt_ft() + config.ground_clearance;

        let bearing = geo::great_circle_bearing( own.lat, own.lon, track.lat, track.lon);
        track.rel_pos = RelativePosition::from_polar( track.horizontal_distance, bearing, own.true_heading);

        let gate = &config.range_gate;
        let in_gate = track.rel_pos.is_in_ellipse( gate.forward, gate.side, gate.back) && track.relative_alt.abs() <= gate.alt;
        if !in_gate {
            track.ta_tau = f64::INFINITY;
            track.ra_tau = f64::INFINITY;
        }

        let candidate = candidate_intrusion( track, params, own.vs_fpm(), config);
        self.apply_hysteresis( track, candidate, input);

        let (lo,hi) = vertical_window( config, own.threat_setting);
        track.is_displayed = !track.on_ground
            && in_gate
            && track.relative_alt >= lo && track.relative_alt <= hi
            && (own.threat_setting != ThreatSetting::Threat || track.intrusion >= Intrusion::Ta);
    }

    fn apply_hysteresis (&self, track: &mut Track, candidate: Intrusion, input: &ClassifierInput) {
        let config = self.config.as_ref();
        let params = input.params;

        if track.intrusion == Intrusion::Ta && candidate < Intrusion::Ta {
            if track.secs_since_last_ta >= config.ta_expiration_delay {
                debug!("TA expired for {}", track.id);
                track.ta_expiring = false;
                track.secs_since_last_ta = 0.0;
                track.intrusion = candidate;
            } else {
                track.ta_expiring = true;
                track.secs_since_last_ta += input.dt;
            }
            return
        }

        if let Some(ra_elapsed) = input.ra_elapsed {
            if track.intrusion == Intrusion::Ra && candidate < Intrusion::Ra {
                if ra_elapsed < config.min_ra_duration {
                    return
                }

                let boost = config.vol_boost;
                let in_boosted_range = track.ta_tau < params.tau_ta * boost || track.slant_distance < params.dmod_ta * boost;
                let in_boosted_alt = track.v_tau < params.tau_ta * boost || track.relative_alt.abs() < params.zthr_ta * boost;
                if in_boosted_range && in_boosted_alt && track.closure_rate >= config.closure_rate_threshold {
                    trace!("holding RA for {} in boosted volume", track.id);
                    return
                }
            }
        }

        if !input.own.slew_active {
            if candidate != track.intrusion {
                debug!("{} intrusion {} -> {}", track.id, track.intrusion, candidate);
            }
            track.intrusion = candidate;
            if candidate >= Intrusion::Ta {
                track.secs_since_last_ta = 0.0;
                track.ta_expiring = false;
            }
        }
    }
}

impl TcasComponent for ThreatClassifier {
    type Input<'a> = (&'a mut [Track], ClassifierInput<'a>);
    type Output = Intrusion;

    fn configure (&mut self, config: Arc<TcasConfig>) { self.config = config; }

    fn tick (&mut self, input: Self::Input<'_>)->Intrusion {
        let (tracks, ci) = input;
        self.classify( tracks, &ci)
    }

    fn reset (&mut self) {}
}
