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
use tracing::debug;

use crate::{TcasComponent, config::{SensitivityParams,TcasConfig}, inhibition::Inhibit};

/// the sensitivity level used before the first update
pub const STANDBY_LEVEL: u8 = 1;
/// the level used while RAs are inhibited
pub const TA_ONLY_LEVEL: u8 = 2;
pub const MAX_LEVEL: u8 = 8;

#[derive(Debug,Clone,Copy)]
pub struct SensitivityInput {
    pub inhibit: Inhibit,
    pub radio_alt: f64,     // ft
    pub pressure_alt: f64,  // ft
    pub advisory_active: bool,
}

/// picks the sensitivity level from altitude bands. The level is frozen while an RA is active so that
/// thresholds do not change under a running advisory
pub struct SensitivityController {
    config: Arc<TcasConfig>,
    level: u8,
}

impl SensitivityController {
    pub fn new (config: Arc<TcasConfig>)->Self {
        SensitivityController { config, level: STANDBY_LEVEL }
    }

    pub fn level (&self)->u8 { self.level }

    /// None if the configured table does not have the current level
    pub fn params (&self)->Option<&SensitivityParams> { self.config.sensitivity_params( self.level) }

    fn select_level (&self, input: &SensitivityInput)->u8 {
        if input.inhibit.is_ra_inhibited() {
            return TA_ONLY_LEVEL
        }

        (TA_ONLY_LEVEL+1..MAX_LEVEL)
            .find( |lvl| {
                self.config.sensitivity_params(*lvl)
                    .and_then( |p| p.band)
                    .map_or( false, |band| band.contains( input.radio_alt, input.pressure_alt))
            })
            .unwrap_or(MAX_LEVEL)
    }
}

impl TcasComponent for SensitivityController {
    type Input<'a> = SensitivityInput;
    type Output = u8;

    fn configure (&mut self, config: Arc<TcasConfig>) { self.config = config; }

    fn tick (&mut self, input: Self::Input<'_>)->u8 {
        if !input.advisory_active {
            let level = self.select_level( &input);
            if level != self.level {
                debug!("sensitivity level {} -> {}", self.level, level);
                self.level = level;
            }
        }
        self.level
    }

    fn reset (&mut self) { self.level = STANDBY_LEVEL; }
}
