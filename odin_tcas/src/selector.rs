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
use tracing::{debug,info};

use crate::{
    TcasComponent,
    advisory::{RaSense,RaVariant,ResAdvisory},
    config::{SensitivityParams,TcasConfig,TrajectoryModel},
    inhibition::Inhibit,
    telemetry::OwnState,
    track::Track
};

/// own-ship altitude at `t_cpa` seconds if we start to accelerate (ft/s²) towards `target_vs` after `delay` seconds
pub fn predicted_altitude (own_alt: f64, own_vs: f64, target_vs: f64, t_cpa: f64, delay: f64, accel: f64)->f64 {
    let accel = if target_vs < own_vs { -accel } else { accel };
    let t_accel = (t_cpa - delay).min( ((target_vs - own_vs) / 60.0) / accel);
    let remaining = t_cpa - (delay + t_accel);

    own_alt
        + (own_vs / 60.0).round() * (delay + t_accel)
        + 0.5 * accel * t_accel * t_accel
        + (target_vs / 60.0) * remaining
}

/// the vertical part of own-ship we need for separation predictions
#[derive(Debug,Clone,Copy)]
pub struct OwnVertical {
    pub alt: f64, // ft
    pub vs: f64,  // fpm
}

impl OwnVertical {
    pub fn from_own_state (own: &OwnState)->Self {
        OwnVertical { alt: own.pressure_alt_ft(), vs: own.vs_fpm() }
    }

    /// minimum separation at CPA over all `tracks` if we maneuver in `sense` towards `target_vs`, and whether
    /// that maneuver would cross any of the contacts. Separations are never negative
    pub fn maneuver_sep (&self, tracks: &[&Track], sense: RaSense, target_vs: f64, delay: f64, accel: f64, crossing_margin: f64)->(f64,bool) {
        let mut min_sep = f64::INFINITY;
        let mut is_crossing = false;

        for track in tracks {
            let t_cpa = track.time_to_cpa();
            let intruder_alt = track.alt_at_cpa();

            let sep = match sense {
                RaSense::Up => {
                    let delay = if self.vs < target_vs { t_cpa.min(delay) } else { 0.0 };
                    if self.alt + crossing_margin < track.alt { is_crossing = true; }
                    predicted_altitude( self.alt, self.vs, target_vs, t_cpa, delay, accel) - intruder_alt
                }
                RaSense::Down => {
                    let delay = if self.vs > target_vs { t_cpa.min(delay) } else { 0.0 };
                    if self.alt - crossing_margin > track.alt { is_crossing = true; }
                    intruder_alt - predicted_altitude( self.alt, self.vs, target_vs, t_cpa, delay, accel)
                }
            };

            min_sep = min_sep.min( sep.max(0.0));
        }

        (min_sep, is_crossing)
    }

    /// minimum separation at CPA over all `tracks` if we keep our current vertical speed
    pub fn unmaneuvered_sep (&self, tracks: &[&Track])->f64 {
        tracks.iter().fold( f64::INFINITY, |min_sep, track| {
            let t_cpa = track.time_to_cpa();
            let own_alt = self.alt + (self.vs / 60.0) * t_cpa;
            min_sep.min( (own_alt - track.alt_at_cpa()).abs())
        })
    }
}

pub fn min_time_to_cpa (tracks: &[&Track])->f64 {
    tracks.iter().fold( f64::INFINITY, |t, track| t.min( track.time_to_cpa()))
}

/// pick a sense from the achievable separations of both. Ties go to the down sense
pub fn choose_sense (up: (f64,bool), down: (f64,bool), alim: f64)->RaSense {
    let (up_sep, up_crossing) = up;
    let (down_sep, down_crossing) = down;
    let greater = if up_sep > down_sep { RaSense::Up } else { RaSense::Down };

    match (up_sep >= alim, down_sep >= alim) {
        (true, true) => {
            match (up_crossing, down_crossing) {
                (true, false) => RaSense::Down,
                (false, true) => RaSense::Up,
                _ => greater
            }
        }
        (false, false) => greater,
        (true, false) => RaSense::Up,
        (false, true) => RaSense::Down,
    }
}

pub struct SelectorInput<'a> {
    pub own: &'a OwnState,
    pub ra_tracks: &'a [&'a Track], // in ascending ra_tau order
    pub params: Option<&'a SensitivityParams>,
    pub inhibit: Inhibit,
    pub active: Option<&'a ResAdvisory>,
    pub fault: bool,
}

/// computes the resolution advisory for the current tick, either a new one or a revision of the active one
pub struct AdvisorySelector {
    config: Arc<TcasConfig>,
}

impl AdvisorySelector {
    pub fn new (config: Arc<TcasConfig>)->Self {
        AdvisorySelector { config }
    }

    pub fn select (&self, input: &SelectorInput)->Option<ResAdvisory> {
        if input.fault || input.ra_tracks.is_empty() {
            return None
        }
        let params = input.params.filter( |p| p.has_ra())?;
        let own = OwnVertical::from_own_state( input.own);

        if let Some(active) = input.active {
            Some( self.revise( active, &own, input.ra_tracks, params, input.inhibit))
        } else {
            let ra = ResAdvisory::new( self.first_variant( &own, input.ra_tracks, params, input.inhibit));
            info!("new {} against {} contacts", ra, input.ra_tracks.len());
            Some(ra)
        }
    }

    fn first_variant (&self, own: &OwnVertical, tracks: &[&Track], params: &SensitivityParams, inhibit: Inhibit)->RaVariant {
        let traj = &self.config.trajectory;
        let alim = params.alim;
        let nominal = traj.nominal_rate;
        let sep = |sense: RaSense, target_vs: f64| {
            own.maneuver_sep( tracks, sense, target_vs, traj.initial_delay, traj.initial_accel, traj.crossing_margin)
        };

        let up = sep( RaSense::Up, nominal);
        let down = sep( RaSense::Down, -nominal);

        let sense = match inhibit.forced_sense() {
            Some(sense) => {
                debug!("sense {} forced by {}", sense, inhibit);
                sense
            }
            None => choose_sense( up, down, alim)
        };
        debug!("up sep: {:.0} (crossing: {}), down sep: {:.0} (crossing: {}), alim: {:.0} -> {}", up.0, up.1, down.0, down.1, alim, sense);

        let (nominal_sep, is_crossing) = match sense { RaSense::Up => up, RaSense::Down => down };
        let (level_sep,_) = sep( sense, 0.0);

        let vs = own.vs;
        let sign = sense.sign();
        let not_committed = vs.abs() < nominal || (vs * sign <= -nominal);

        if not_committed {
            let predicted_sep = own.unmaneuvered_sep( tracks);
            if predicted_sep >= alim { // preventive, use the weakest one that still achieves ALIM
                for limit in [2000, 1000, 500] {
                    let (limit_sep,_) = sep( sense, -sign * limit as f64);
                    if limit_sep >= alim {
                        if let Some(variant) = RaVariant::monitor_vs( sense, limit) {
                            return variant
                        }
                    }
                }
                if level_sep >= alim {
                    RaVariant::monitor_vs( sense, 0).unwrap_or( RaVariant::level_off(sense))
                } else {
                    RaVariant::nominal( sense, is_crossing)
                }

            } else if nominal_sep > level_sep {
                RaVariant::nominal( sense, is_crossing)
            } else {
                RaVariant::level_off( sense)
            }

        } else { // already past the nominal rate in the direction of the sense
            if nominal_sep > level_sep {
                RaVariant::maintain_vs( sense, is_crossing)
            } else {
                RaVariant::level_off( sense)
            }
        }
    }

    fn revise (&self, active: &ResAdvisory, own: &OwnVertical, tracks: &[&Track], params: &SensitivityParams, inhibit: Inhibit)->ResAdvisory {
        let config = self.config.as_ref();
        let traj = &config.trajectory;
        let alim = params.alim;
        let sense = active.sense();
        let callout = active.callout();

        let still_critical = tracks.iter().any( |t| (own.alt - t.alt).abs() < params.zthr_ta);
        if !still_critical {
            return if active.secs_since_start >= config.min_ra_duration && !callout.is_weak() {
                let revised = active.revise( RaVariant::level_off(sense));
                info!("weakening to {}", revised);
                revised
            } else {
                active.hold()
            }
        }

        let predicted_sep = own.unmaneuvered_sep( tracks);
        if predicted_sep >= alim {
            return active.hold()
        }

        let followup_sep = |sense: RaSense, target_vs: f64| {
            own.maneuver_sep( tracks, sense, target_vs, traj.followup_delay, traj.followup_accel, traj.crossing_margin)
        };

        let strengthened: Option<(RaVariant,f64)> = if callout.is_weak() {
            let (sep, is_crossing) = followup_sep( sense, sense.sign() * traj.nominal_rate);
            Some( (RaVariant::nominal( sense, is_crossing), sep) )

        } else if callout.is_increasable()
                && own.vs * sense.sign() >= traj.nominal_rate
                && !inhibit.is_increase_inhibited(sense) {
            let (sep,_) = followup_sep( sense, sense.sign() * traj.increase_rate);
            Some( (RaVariant::increase( sense), sep) )

        } else {
            None
        };

        let strengthen_or_hold = || {
            match strengthened {
                Some((variant,_)) => {
                    let revised = active.revise( variant);
                    info!("strengthening to {}", revised);
                    revised
                }
                None => active.hold()
            }
        };

        if active.is_reversal
            || active.secs_since_start < config.min_ra_duration
            || min_time_to_cpa( tracks) < config.min_reversal_cpa_time
            || inhibit.is_reversal_inhibited() {
            return strengthen_or_hold()
        }

        let reverse_sense = sense.opposite();
        let (reverse_sep,_) = followup_sep( reverse_sense, reverse_sense.sign() * traj.nominal_rate);
        let same_sep = strengthened.map_or( predicted_sep, |(_,sep)| sep);
        debug!("same sense sep: {:.0}, reverse sep: {:.0}, alim: {:.0}", same_sep, reverse_sep, alim);

        let reverse = match (same_sep >= alim, reverse_sep >= alim) {
            (true, _) => false,
            (false, true) => true,
            (false, false) => reverse_sep > same_sep,
        };

        if reverse {
            let reversed = active.reverse();
            info!("reversing to {}", reversed);
            reversed
        } else {
            strengthen_or_hold()
        }
    }
}

impl TcasComponent for AdvisorySelector {
    type Input<'a> = SelectorInput<'a>;
    type Output = Option<ResAdvisory>;

    fn configure (&mut self, config: Arc<TcasConfig>) { self.config = config; }

    fn tick (&mut self, input: Self::Input<'_>)->Option<ResAdvisory> {
        self.select( &input)
    }

    fn reset (&mut self) {}
}
