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

use std::{fmt, collections::VecDeque, sync::Arc};
use serde::Serialize;
use tracing::{debug,warn};

use crate::{TcasComponent, config::TcasConfig};

/// an aural cue, identified by name. Length is in seconds
#[derive(Serialize,Debug,Clone,Copy,PartialEq)]
pub struct Sound {
    pub name: &'static str,
    pub length: f64,
}

impl Sound {
    pub const fn new (name: &'static str, length: f64)->Self { Sound { name, length } }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Sound( {}, {:.1}s )", self.name, self.length)
    }
}

pub const TRAFFIC_TRAFFIC: Sound = Sound::new( "tcas_traffic_traffic", 1.5);
pub const CLEAR_OF_CONFLICT: Sound = Sound::new( "tcas_clear_of_conflict", 1.5);

pub const CLIMB_CLIMB: Sound = Sound::new( "tcas_climb_climb", 1.5);
pub const CLIMB_CROSSING_CLIMB: Sound = Sound::new( "tcas_climb_crossing_climb", 2.0);
pub const INCREASE_CLIMB: Sound = Sound::new( "tcas_increase_climb", 1.2);
pub const CLIMB_CLIMB_NOW: Sound = Sound::new( "tcas_climb_climb_now", 1.7);

pub const DESCEND_DESCEND: Sound = Sound::new( "tcas_descend_descend", 1.7);
pub const DESCEND_CROSSING_DESCEND: Sound = Sound::new( "tcas_descend_crossing_descend", 2.2);
pub const INCREASE_DESCENT: Sound = Sound::new( "tcas_increase_descent", 1.3);
pub const DESCEND_DESCEND_NOW: Sound = Sound::new( "tcas_descend_descend_now", 1.9);

pub const MONITOR_VS: Sound = Sound::new( "tcas_monitor_vertical_speed", 1.8);
pub const MAINTAIN_VS: Sound = Sound::new( "tcas_maintain_vertical_speed_maintain", 2.5);
pub const MAINTAIN_VS_CROSSING: Sound = Sound::new( "tcas_maintain_vertical_speed_crossing_maintain", 3.2);
pub const LEVEL_OFF: Sound = Sound::new( "tcas_level_off_level_off", 1.6);

/// a cue that is replayed every `period` seconds while registered
#[derive(Debug,Clone)]
struct PeriodicSound {
    sound: Sound,
    period: f64,
    secs_since_played: Option<f64>, // None if never played
}

/// makes sure at most one cue is playing at any time. Requests that can't be served right away are
/// queued (if the caller asks for a retry) and played in FIFO order, periodic cues fill the gaps
#[derive(Debug,Default)]
pub struct SoundScheduler {
    playing: Option<(Sound,f64)>, // the sound and its remaining play time in seconds
    queue: VecDeque<Sound>,
    periodic: Vec<PeriodicSound>,
    started: Vec<Sound>,
}

impl SoundScheduler {
    pub fn new ()->Self { Self::default() }

    pub fn playing (&self)->Option<&Sound> { self.playing.as_ref().map( |(s,_)| s) }
    pub fn is_playing (&self)->bool { self.playing.is_some() }
    pub fn queue_len (&self)->usize { self.queue.len() }

    /// advance the scheduler by `dt` seconds
    pub fn update (&mut self, dt: f64) {
        let finished = matches!( self.playing, Some((_,remaining)) if remaining <= 0.0);
        if finished {
            self.playing = None;
        } else if let Some((_,remaining)) = &mut self.playing {
            *remaining -= dt;
        }

        if self.playing.is_none() {
            if let Some(sound) = self.queue.pop_front() {
                self.try_play( sound, false, false);
            }
        }

        // can't iterate over self.periodic while calling try_play
        for i in 0..self.periodic.len() {
            let PeriodicSound { sound, period, secs_since_played } = self.periodic[i].clone();
            match secs_since_played {
                Some(secs) if secs < period => {
                    self.periodic[i].secs_since_played = Some(secs + dt);
                }
                _ => {
                    if self.try_play( sound, false, false) {
                        self.periodic[i].secs_since_played = Some(0.0);
                    }
                }
            }
        }
    }

    /// start `sound` if nothing else is playing. If we can't and `retry` is set the sound is queued.
    /// `repeat_once` queues a second instance to be played after the first one
    pub fn try_play (&mut self, sound: Sound, retry: bool, repeat_once: bool)->bool {
        if self.playing.is_none() {
            debug!("playing {}", sound);
            self.playing = Some((sound, sound.length));
            self.started.push(sound);
            if repeat_once {
                self.queue.push_back(sound);
            }
            true

        } else {
            if retry {
                self.queue.push_back(sound);
                if repeat_once {
                    self.queue.push_back(sound);
                }
            }
            false
        }
    }

    /// register a periodic cue. Periods shorter than the sound length are replaced by the length.
    /// Sounds that are already registered are ignored
    pub fn add_periodic (&mut self, sound: Sound, period: f64) {
        let period = if period < sound.length {
            warn!("period {} of {} is shorter than its length, using length", period, sound);
            sound.length
        } else {
            period
        };

        if !self.periodic.iter().any( |ps| ps.sound.name == sound.name) {
            self.periodic.push( PeriodicSound { sound, period, secs_since_played: None });
        }
    }

    pub fn remove_periodic (&mut self, sound: &Sound) {
        self.periodic.retain( |ps| ps.sound.name != sound.name);
    }

    /// the sounds that were started since the last call
    pub fn take_started (&mut self)->Vec<Sound> {
        std::mem::take( &mut self.started)
    }
}

impl TcasComponent for SoundScheduler {
    type Input<'a> = f64; // frame time in seconds
    type Output = ();

    // cue lengths and periods are not configurable
    fn configure (&mut self, _config: Arc<TcasConfig>) {}

    fn tick (&mut self, dt: Self::Input<'_>) {
        self.update( dt)
    }

    fn reset (&mut self) {
        self.playing = None;
        self.queue.clear();
        self.periodic.clear();
        self.started.clear();
    }
}
