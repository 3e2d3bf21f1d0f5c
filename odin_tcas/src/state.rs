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
use tracing::{info,warn};

use crate::{
    TcasComponent,
    advisory::{RaSense,ResAdvisory,VsBand},
    config::TcasConfig,
    inhibition::Inhibit,
    sound::{self,Sound}
};

/// the overall annunciation state
#[derive(Serialize,Deserialize,Debug,Display,Clone,Copy,PartialEq,Eq,Hash,Default)]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum AdvisoryState {
    #[default]
    None,
    Ta,
    Ra,
}

/// a request to play an aural cue. Repeating cues are played twice
#[derive(Serialize,Debug,Clone,Copy,PartialEq)]
pub struct SoundRequest {
    pub sound: Sound,
    pub repeat: bool,
}

/// the vertical speed guidance we publish for an RA
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct RaGuidance {
    pub sense: RaSense,
    pub red: VsBand,
    pub green: Option<VsBand>, // only for corrective RAs
    pub corrective: bool,
}

impl RaGuidance {
    pub fn from_advisory (ra: &ResAdvisory)->Self {
        let guidance = ra.variant.guidance();
        RaGuidance {
            sense: ra.sense(),
            red: guidance.red,
            green: guidance.green,
            corrective: ra.is_corrective()
        }
    }
}

#[derive(Debug,Clone)]
pub struct StateInput {
    pub ta_count: usize, // alive tracks at TA level
    pub ra_count: usize, // tracks at RA level
    pub inhibit: Inhibit,
    pub fault: bool,
    pub candidate: Option<ResAdvisory>,
    pub dt: f64,
}

pub struct AdvisoryStateMachine {
    config: Arc<TcasConfig>,
    state: AdvisoryState,
    active: Option<ResAdvisory>,
    guidance: Option<RaGuidance>,
}

impl AdvisoryStateMachine {
    pub fn new (config: Arc<TcasConfig>)->Self {
        AdvisoryStateMachine { config, state: AdvisoryState::None, active: None, guidance: None }
    }

    pub fn state (&self)->AdvisoryState { self.state }
    pub fn active (&self)->Option<&ResAdvisory> { self.active.as_ref() }
    pub fn guidance (&self)->Option<&RaGuidance> { self.guidance.as_ref() }

    fn leave_ra (&mut self, ta_count: usize) {
        self.state = if ta_count > 0 { AdvisoryState::Ta } else { AdvisoryState::None };
        self.active = None;
        self.guidance = None;
    }

    /// run the transitions for one tick and return the cues to play
    pub fn update (&mut self, input: StateInput)->Vec<SoundRequest> {
        let mut requests = Vec::new();
        let can_ra = input.ra_count > 0 && !input.inhibit.is_ra_inhibited() && !input.fault;

        match self.state {
            AdvisoryState::None => {
                if can_ra {
                    info!("RA state entered");
                    self.state = AdvisoryState::Ra;
                } else if input.ta_count > 0 {
                    info!("traffic advisory");
                    self.state = AdvisoryState::Ta;
                    if !input.inhibit.is_ta_aural_inhibited() {
                        requests.push( SoundRequest { sound: sound::TRAFFIC_TRAFFIC, repeat: false });
                    }
                }
            }
            AdvisoryState::Ta => {
                if can_ra {
                    info!("TA upgraded to RA");
                    self.state = AdvisoryState::Ra;
                } else if input.ta_count == 0 {
                    info!("TA resolved");
                    self.state = AdvisoryState::None;
                }
            }
            AdvisoryState::Ra => {
                if input.fault {
                    warn!("RA dropped because of fault");
                    self.leave_ra( input.ta_count);
                } else if input.ra_count == 0 {
                    info!("clear of conflict");
                    self.leave_ra( input.ta_count);
                    requests.push( SoundRequest { sound: sound::CLEAR_OF_CONFLICT, repeat: false });
                }
            }
        }

        if self.state == AdvisoryState::Ra {
            if let Some(mut ra) = input.candidate {
                ra.secs_since_start += input.dt;
                if !ra.has_been_announced {
                    info!("announcing {}", ra);
                    requests.push( SoundRequest { sound: ra.callout().sound(), repeat: ra.is_corrective() });
                    self.guidance = Some( RaGuidance::from_advisory( &ra));
                    ra.has_been_announced = true;
                }
                self.active = Some(ra);
            }
        }

        requests
    }
}

impl TcasComponent for AdvisoryStateMachine {
    type Input<'a> = StateInput;
    type Output = Vec<SoundRequest>;

    fn configure (&mut self, config: Arc<TcasConfig>) { self.config = config; }

    fn tick (&mut self, input: Self::Input<'_>)->Vec<SoundRequest> {
        self.update( input)
    }

    fn reset (&mut self) {
        self.state = AdvisoryState::None;
        self.active = None;
        self.guidance = None;
    }
}
