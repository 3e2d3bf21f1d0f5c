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

//! a collision avoidance decision engine. [`TcasComputer`] turns own-ship state and contact snapshots into traffic
//! and resolution advisories, aural cue requests and display data, one logic tick at a time

use std::{sync::Arc, time::Duration};
use serde::Serialize;
use tracing::{debug,trace,warn};

pub mod errors;
pub mod config;
pub mod geo;
pub mod telemetry;
pub mod inhibition;
pub mod sensitivity;
pub mod track;
pub mod classifier;
pub mod advisory;
pub mod selector;
pub mod state;
pub mod sound;
pub mod status;
pub mod display;
pub mod throttle;

use crate::{
    errors::Result,
    config::TcasConfig,
    telemetry::{OwnState,TelemetryPoll,TelemetrySource},
    inhibition::InhibitionEngine,
    sensitivity::{SensitivityController,SensitivityInput},
    track::{Intrusion,TrackInput,TrackManager},
    classifier::{ClassifierInput,ThreatClassifier},
    selector::{AdvisorySelector,SelectorInput},
    state::{AdvisoryState,AdvisoryStateMachine,SoundRequest,StateInput},
    sound::{Sound,SoundScheduler},
    status::{StatusInput,StatusMonitor,TcasStatus},
    display::{TcasReport,project_traffic},
    throttle::UpdateThrottler,
};

/// the common interface of the engine stages. Each stage owns its state, which is only mutated from within `tick`
pub trait TcasComponent {
    type Input<'a>;
    type Output;

    fn configure (&mut self, config: Arc<TcasConfig>);
    fn tick (&mut self, input: Self::Input<'_>)->Self::Output;
    fn reset (&mut self);
}

/// the result of a (frame) update
#[derive(Serialize,Debug,Clone)]
pub struct TcasUpdate {
    pub sound_requests: Vec<SoundRequest>, // what the logic asked for
    pub sounds_started: Vec<Sound>,        // what the scheduler actually started during this frame
    pub report: Option<TcasReport>,        // None if the logic did not run
}

/// the engine. Hosts create one per session and call `update` from their frame loop
pub struct TcasComputer {
    config: Arc<TcasConfig>,

    throttler: UpdateThrottler,
    inhibition: InhibitionEngine,
    status: StatusMonitor,
    sensitivity: SensitivityController,
    tracks: TrackManager,
    classifier: ThreatClassifier,
    selector: AdvisorySelector,
    state_machine: AdvisoryStateMachine,
    sounds: SoundScheduler,

    secs_since_ingest: f64,
}

impl TcasComputer {
    pub fn new (config: TcasConfig)->Result<Self> {
        config.validate()?;
        let config = Arc::new(config);

        Ok( TcasComputer {
            throttler: UpdateThrottler::new( config.refresh_interval),
            inhibition: InhibitionEngine::new( config.clone()),
            status: StatusMonitor::new( config.clone()),
            sensitivity: SensitivityController::new( config.clone()),
            tracks: TrackManager::new( config.clone()),
            classifier: ThreatClassifier::new( config.clone()),
            selector: AdvisorySelector::new( config.clone()),
            state_machine: AdvisoryStateMachine::new( config.clone()),
            sounds: SoundScheduler::new(),
            secs_since_ingest: 0.0,
            config,
        })
    }

    pub fn config (&self)->&TcasConfig { self.config.as_ref() }
    pub fn tracks (&self)->&TrackManager { &self.tracks }
    pub fn advisory_state (&self)->AdvisoryState { self.state_machine.state() }
    pub fn state_machine (&self)->&AdvisoryStateMachine { &self.state_machine }
    pub fn sensitivity_level (&self)->u8 { self.sensitivity.level() }
    pub fn sounds (&self)->&SoundScheduler { &self.sounds }

    /// replace the configuration of all stages. Tracks and advisory state are kept
    pub fn configure (&mut self, config: TcasConfig)->Result<()> {
        config.validate()?;
        let config = Arc::new(config);

        self.throttler.configure( config.clone());
        self.sounds.configure( config.clone());
        self.inhibition.configure( config.clone());
        self.status.configure( config.clone());
        self.sensitivity.configure( config.clone());
        self.tracks.configure( config.clone());
        self.classifier.configure( config.clone());
        self.selector.configure( config.clone());
        self.state_machine.configure( config.clone());
        self.config = config;
        Ok(())
    }

    pub fn reset (&mut self) {
        self.throttler.reset();
        self.inhibition.reset();
        self.status.reset();
        self.sensitivity.reset();
        self.tracks.reset();
        self.classifier.reset();
        self.selector.reset();
        self.state_machine.reset();
        self.sounds.reset();
        self.secs_since_ingest = 0.0;
    }

    /// frame update with a telemetry source that is polled (without blocking) if the logic runs
    pub fn update_from<S: TelemetrySource> (&mut self, dt: Duration, own: &OwnState, source: &mut S)->TcasUpdate {
        let frame_dt = dt.as_secs_f64();
        self.sounds.tick( frame_dt);

        match self.throttler.tick( frame_dt) {
            Some(tick_dt) => {
                let poll = source.poll_contacts();
                self.run_tick( tick_dt, own, poll)
            }
            None => TcasUpdate { sound_requests: Vec::new(), sounds_started: self.sounds.take_started(), report: None }
        }
    }

    /// frame update. The sound scheduler advances on every call, the logic only runs once the refresh interval has passed
    pub fn update (&mut self, dt: Duration, own: &OwnState, poll: TelemetryPoll)->TcasUpdate {
        let frame_dt = dt.as_secs_f64();
        self.sounds.tick( frame_dt);

        match self.throttler.tick( frame_dt) {
            Some(tick_dt) => self.run_tick( tick_dt, own, poll),
            None => TcasUpdate { sound_requests: Vec::new(), sounds_started: self.sounds.take_started(), report: None }
        }
    }

    fn run_tick (&mut self, dt: f64, own: &OwnState, poll: TelemetryPoll)->TcasUpdate {
        let (report, sound_requests) = self.tick( dt, own, poll);
        for req in &sound_requests {
            self.sounds.try_play( req.sound, true, req.repeat);
        }
        TcasUpdate { sound_requests, sounds_started: self.sounds.take_started(), report: Some(report) }
    }

    /// one logic tick. This never fails, problems degrade to "no advisory"
    fn tick (&mut self, dt: f64, own: &OwnState, poll: TelemetryPoll)->(TcasReport, Vec<SoundRequest>) {
        let config = self.config.clone();
        self.secs_since_ingest += dt;

        let inhibit = self.inhibition.tick( own);
        let (fault, ta_only) = self.status.tick( StatusInput { own, inhibit });
        let mut status = TcasStatus { standby: false, fault, ta_only, sensitivity: self.sensitivity.level(), inhibit };

        if own.is_standby() {
            status.standby = true;
            return (TcasReport::standby( status), Vec::new())
        }

        let advisory_active = self.state_machine.active().is_some();
        let level = self.sensitivity.tick( SensitivityInput {
            inhibit,
            radio_alt: own.radio_alt_ft(),
            pressure_alt: own.pressure_alt_ft(),
            advisory_active
        });
        status.sensitivity = level;

        let Some(params) = config.sensitivity_params( level) else {
            warn!("no sensitivity parameters for level {}", level);
            return (TcasReport::standby( status), Vec::new())
        };

        match poll {
            TelemetryPoll::Ready(contacts) => {
                let n = self.tracks.tick( TrackInput { contacts: &contacts, own, params, dt: self.secs_since_ingest });
                trace!("ingested {} contacts, {} tracks", contacts.len(), n);
                self.secs_since_ingest = 0.0;
            }
            TelemetryPoll::Pending => {
                trace!("no telemetry update");
            }
            TelemetryPoll::Unavailable(e) => {
                warn!("telemetry unavailable: {}", e);
            }
        }

        let ra_elapsed = self.state_machine.active().map( |ra| ra.secs_since_start);
        self.classifier.tick( (self.tracks.tracks_mut(), ClassifierInput { own, params, ra_elapsed, dt }));

        let ra_tracks = self.tracks.ra_tracks();
        let candidate = self.selector.tick( SelectorInput {
            own,
            ra_tracks: &ra_tracks,
            params: Some(params),
            inhibit,
            active: self.state_machine.active(),
            fault
        });

        let state_input = StateInput {
            ta_count: self.tracks.count_alive( Intrusion::Ta),
            ra_count: ra_tracks.len(),
            inhibit,
            fault,
            candidate,
            dt
        };
        let sound_requests = self.state_machine.tick( state_input);

        let report = TcasReport {
            state: self.state_machine.state(),
            advisory: self.state_machine.active().copied(),
            guidance: self.state_machine.guidance().copied(),
            traffic: project_traffic( self.tracks.tracks(), config.max_displayed, config.trend_threshold),
            status
        };

        (report, sound_requests)
    }
}
