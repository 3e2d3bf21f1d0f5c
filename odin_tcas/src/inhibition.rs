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

use std::sync::Arc;
use serde::{Serialize,Deserialize};
use strum::Display;
use tracing::debug;

use crate::{TcasComponent, advisory::RaSense, config::{InhibitionBands,TcasConfig}, telemetry::{OwnState,TcasMode}};

/// advisory classes that are currently suppressed, in order of increasing restriction
#[derive(Serialize,Deserialize,Debug,Display,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Default)]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum Inhibit {
    #[default]
    None,
    AllClimbRa,
    AllIncrDescRa,
    AllDescRa,
    AllRa,
    AllRaAuralTa,
}

impl Inhibit {
    /// no RA can be issued at all
    pub fn is_ra_inhibited (&self)->bool {
        matches!( self, Inhibit::AllRa | Inhibit::AllRaAuralTa)
    }

    pub fn is_ta_aural_inhibited (&self)->bool { *self == Inhibit::AllRaAuralTa }

    /// the sense we have to pick regardless of geometry, if any
    pub fn forced_sense (&self)->Option<RaSense> {
        match self {
            Inhibit::AllDescRa => Some(RaSense::Up),
            Inhibit::AllClimbRa => Some(RaSense::Down),
            _ => None
        }
    }

    pub fn is_reversal_inhibited (&self)->bool {
        matches!( self, Inhibit::AllClimbRa | Inhibit::AllDescRa)
    }

    /// can we strengthen into an increase rate RA for the given sense
    pub fn is_increase_inhibited (&self, sense: RaSense)->bool {
        match sense {
            RaSense::Up => *self == Inhibit::AllClimbRa,
            RaSense::Down => matches!( self, Inhibit::AllIncrDescRa | Inhibit::AllDescRa)
        }
    }
}

/// the altitude band logic. Lowest radio altitude bands are the most restrictive, GPWS warnings silence
/// everything but visual TAs
pub fn compute_inhibit (bands: &InhibitionBands, radio_alt: f64, pressure_alt: f64, tcas_mode: TcasMode, gpws_warning: bool)->Inhibit {
    if radio_alt < bands.aural_ta_below || gpws_warning {
        Inhibit::AllRaAuralTa
    } else if radio_alt < bands.all_ra_below || tcas_mode == TcasMode::Ta {
        Inhibit::AllRa
    } else if radio_alt < bands.desc_ra_below {
        Inhibit::AllDescRa
    } else if radio_alt < bands.incr_desc_ra_below {
        Inhibit::AllIncrDescRa
    } else if pressure_alt > bands.climb_ra_above {
        Inhibit::AllClimbRa
    } else {
        Inhibit::None
    }
}

pub struct InhibitionEngine {
    config: Arc<TcasConfig>,
    inhibit: Inhibit,
}

impl InhibitionEngine {
    pub fn new (config: Arc<TcasConfig>)->Self {
        InhibitionEngine { config, inhibit: Inhibit::None }
    }

    pub fn inhibit (&self)->Inhibit { self.inhibit }
}

impl TcasComponent for InhibitionEngine {
    type Input<'a> = &'a OwnState;
    type Output = Inhibit;

    fn configure (&mut self, config: Arc<TcasConfig>) { self.config = config; }

    fn tick (&mut self, own: Self::Input<'_>)->Inhibit {
        let inhibit = compute_inhibit( &self.config.inhibition, own.radio_alt_ft(), own.pressure_alt_ft(), own.tcas_mode, own.gpws_warning);
        if inhibit != self.inhibit {
            debug!("inhibition changed {} -> {}", self.inhibit, inhibit);
            self.inhibit = inhibit;
        }
        inhibit
    }

    fn reset (&mut self) { self.inhibit = Inhibit::None; }
}
