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
use uom::si::length::foot;
use tracing::warn;

use crate::{TcasComponent, config::TcasConfig, inhibition::Inhibit, telemetry::OwnState};

/// system status flags we publish each tick
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Default)]
pub struct TcasStatus {
    pub standby: bool,
    pub fault: bool,
    pub ta_only: bool,
    pub sensitivity: u8,
    pub inhibit: Inhibit,
}

/// true if the redundant air data altitudes are not both available or disagree by more than `max_diff` ft
pub fn is_altitude_fault (own: &OwnState, max_diff: f64)->bool {
    match (own.adr_alt, own.adr_alt_standby) {
        (Some(a), Some(b)) => (a.get::<foot>() - b.get::<foot>()).abs() > max_diff,
        _ => true
    }
}

pub struct StatusInput<'a> {
    pub own: &'a OwnState,
    pub inhibit: Inhibit,
}

pub struct StatusMonitor {
    config: Arc<TcasConfig>,
    fault: bool,
    ta_only: bool,
}

impl StatusMonitor {
    pub fn new (config: Arc<TcasConfig>)->Self {
        StatusMonitor { config, fault: false, ta_only: false }
    }

    pub fn is_fault (&self)->bool { self.fault }
    pub fn is_ta_only (&self)->bool { self.ta_only }
}

impl TcasComponent for StatusMonitor {
    type Input<'a> = StatusInput<'a>;
    type Output = (bool,bool); // (fault, ta_only)

    fn configure (&mut self, config: Arc<TcasConfig>) { self.config = config; }

    fn tick (&mut self, input: Self::Input<'_>)->(bool,bool) {
        let (fault, ta_only) = if input.own.ground_phase {
            (false, false)
        } else {
            (is_altitude_fault( input.own, self.config.fault_alt_disagreement), input.inhibit.is_ra_inhibited())
        };

        if fault && !self.fault {
            warn!("altitude sources unavailable or inconsistent, advisories suppressed");
        }
        self.fault = fault;
        self.ta_only = ta_only;

        (fault, ta_only)
    }

    fn reset (&mut self) {
        self.fault = false;
        self.ta_only = false;
    }
}
