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
use crate::{TcasComponent, config::TcasConfig};

/// lets a logic tick run once the configured interval has passed. The host can call us every frame
#[derive(Debug,Clone)]
pub struct UpdateThrottler {
    interval: f64,    // s
    accumulated: f64, // s since last accepted update
}

impl UpdateThrottler {
    pub fn new (interval: f64)->Self {
        UpdateThrottler { interval, accumulated: 0.0 }
    }

    pub fn interval (&self)->f64 { self.interval }

    /// accumulate `dt` seconds and return the accumulated time if we are due for an update
    pub fn can_update (&mut self, dt: f64)->Option<f64> {
        self.accumulated += dt;
        if self.accumulated >= self.interval {
            let dt = self.accumulated;
            self.accumulated = 0.0;
            Some(dt)
        } else {
            None
        }
    }
}

impl TcasComponent for UpdateThrottler {
    type Input<'a> = f64; // frame time in seconds
    type Output = Option<f64>;

    fn configure (&mut self, config: Arc<TcasConfig>) {
        self.interval = config.refresh_interval;
    }

    fn tick (&mut self, dt: Self::Input<'_>)->Option<f64> {
        self.can_update( dt)
    }

    fn reset (&mut self) { self.accumulated = 0.0; }
}
