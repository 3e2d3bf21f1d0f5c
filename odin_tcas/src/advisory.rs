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

use std::fmt;
use serde::{Serialize,Deserialize};
use strum::Display;

use crate::sound::{self,Sound};

#[derive(Serialize,Deserialize,Debug,Display,Clone,Copy,PartialEq,Eq,Hash)]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum RaSense {
    Up,
    Down,
}

impl RaSense {
    pub fn opposite (&self)->RaSense {
        match self {
            RaSense::Up => RaSense::Down,
            RaSense::Down => RaSense::Up,
        }
    }

    /// sign of vertical speeds in this sense
    pub fn sign (&self)->f64 {
        match self {
            RaSense::Up => 1.0,
            RaSense::Down => -1.0,
        }
    }
}

/// preventive RAs only restrict the vertical speed, corrective ones require a change
#[derive(Serialize,Deserialize,Debug,Display,Clone,Copy,PartialEq,Eq,Hash)]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum RaType {
    Preventive,
    Corrective,
}

/// what the crew hears
#[derive(Serialize,Deserialize,Debug,Display,Clone,Copy,PartialEq,Eq,Hash)]
#[strum(serialize_all="SCREAMING_SNAKE_CASE")]
pub enum Callout {
    Climb,
    ClimbCross,
    ClimbIncrease,
    ClimbNow,
    Descend,
    DescendCross,
    DescendIncrease,
    DescendNow,
    MonitorVs,
    MaintainVs,
    MaintainVsCross,
    LevelOff,
}

impl Callout {
    pub fn sound (&self)->Sound {
        match self {
            Callout::Climb => sound::CLIMB_CLIMB,
            Callout::ClimbCross => sound::CLIMB_CROSSING_CLIMB,
            Callout::ClimbIncrease => sound::INCREASE_CLIMB,
            Callout::ClimbNow => sound::CLIMB_CLIMB_NOW,
            Callout::Descend => sound::DESCEND_DESCEND,
            Callout::DescendCross => sound::DESCEND_CROSSING_DESCEND,
            Callout::DescendIncrease => sound::INCREASE_DESCENT,
            Callout::DescendNow => sound::DESCEND_DESCEND_NOW,
            Callout::MonitorVs => sound::MONITOR_VS,
            Callout::MaintainVs => sound::MAINTAIN_VS,
            Callout::MaintainVsCross => sound::MAINTAIN_VS_CROSSING,
            Callout::LevelOff => sound::LEVEL_OFF,
        }
    }

    /// level off and monitor vs are the weakest advisories. They can't be weakened any further
    pub fn is_weak (&self)->bool {
        matches!( self, Callout::LevelOff | Callout::MonitorVs)
    }

    /// callouts that can be strengthened into an increase rate advisory
    pub fn is_increasable (&self)->bool {
        matches!( self,
            Callout::Climb | Callout::ClimbCross | Callout::ClimbNow |
            Callout::Descend | Callout::DescendCross | Callout::DescendNow |
            Callout::MaintainVs | Callout::MaintainVsCross
        )
    }
}

/// a closed vertical speed interval in fpm
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct VsBand {
    pub min: f64,
    pub max: f64,
}

impl VsBand {
    pub const fn new (min: f64, max: f64)->Self { VsBand { min, max } }

    pub fn contains (&self, vs: f64)->bool { vs >= self.min && vs <= self.max }
}

impl fmt::Display for VsBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "[{:.0},{:.0}]", self.min, self.max)
    }
}

const MAX_VS: f64 = 6000.0; // fpm, display limit of the VSI

/// vertical speed guidance of an advisory. Red is the range to avoid, green the range to fly.
/// Preventive advisories have no green band
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct VsGuidance {
    pub red: VsBand,
    pub green: Option<VsBand>,
}

impl VsGuidance {
    const fn corrective (red_min: f64, red_max: f64, green_min: f64, green_max: f64)->Self {
        VsGuidance { red: VsBand::new(red_min,red_max), green: Some(VsBand::new(green_min,green_max)) }
    }

    const fn preventive (red_min: f64, red_max: f64)->Self {
        VsGuidance { red: VsBand::new(red_min,red_max), green: None }
    }
}

/// the closed set of resolution advisories we can issue
#[derive(Serialize,Deserialize,Debug,Display,Clone,Copy,PartialEq,Eq,Hash)]
#[strum(serialize_all="snake_case")]
pub enum RaVariant {
    // up sense
    Climb,
    ClimbCross,
    ClimbIncrease,
    ClimbNow,
    ClimbMaintainVs,
    ClimbMaintainVsCrossing,
    LevelOff300Above,
    MonitorVsClimb0,
    MonitorVsClimb500,
    MonitorVsClimb1000,
    MonitorVsClimb2000,

    // down sense
    Descend,
    DescendCross,
    DescendIncrease,
    DescendNow,
    DescendMaintainVs,
    DescendMaintainVsCrossing,
    LevelOff300Below,
    MonitorVsDescend0,
    MonitorVsDescend500,
    MonitorVsDescend1000,
    MonitorVsDescend2000,
}

impl RaVariant {
    pub fn sense (&self)->RaSense {
        use RaVariant::*;
        match self {
            Climb | ClimbCross | ClimbIncrease | ClimbNow | ClimbMaintainVs | ClimbMaintainVsCrossing |
            LevelOff300Above | MonitorVsClimb0 | MonitorVsClimb500 | MonitorVsClimb1000 | MonitorVsClimb2000 => RaSense::Up,
            _ => RaSense::Down
        }
    }

    pub fn callout (&self)->Callout {
        use RaVariant::*;
        match self {
            Climb => Callout::Climb,
            ClimbCross => Callout::ClimbCross,
            ClimbIncrease => Callout::ClimbIncrease,
            ClimbNow => Callout::ClimbNow,
            Descend => Callout::Descend,
            DescendCross => Callout::DescendCross,
            DescendIncrease => Callout::DescendIncrease,
            DescendNow => Callout::DescendNow,
            ClimbMaintainVs | DescendMaintainVs => Callout::MaintainVs,
            ClimbMaintainVsCrossing | DescendMaintainVsCrossing => Callout::MaintainVsCross,
            LevelOff300Above | LevelOff300Below => Callout::LevelOff,
            MonitorVsClimb0 | MonitorVsClimb500 | MonitorVsClimb1000 | MonitorVsClimb2000 |
            MonitorVsDescend0 | MonitorVsDescend500 | MonitorVsDescend1000 | MonitorVsDescend2000 => Callout::MonitorVs,
        }
    }

    pub fn ra_type (&self)->RaType {
        if self.guidance().green.is_some() { RaType::Corrective } else { RaType::Preventive }
    }

    pub fn is_corrective (&self)->bool { self.ra_type() == RaType::Corrective }

    pub fn guidance (&self)->VsGuidance {
        use RaVariant::*;
        match self {
            Climb | ClimbCross | ClimbNow   => VsGuidance::corrective( -MAX_VS, 1500.0, 1500.0, 2000.0),
            ClimbIncrease                   => VsGuidance::corrective( -MAX_VS, 2500.0, 2500.0, 4400.0),
            ClimbMaintainVs | ClimbMaintainVsCrossing => VsGuidance::corrective( -MAX_VS, 1500.0, 1500.0, 4400.0),
            LevelOff300Above                => VsGuidance::corrective( -MAX_VS, 0.0, 0.0, 300.0),
            MonitorVsClimb0                 => VsGuidance::preventive( -MAX_VS, 0.0),
            MonitorVsClimb500               => VsGuidance::preventive( -MAX_VS, -500.0),
            MonitorVsClimb1000              => VsGuidance::preventive( -MAX_VS, -1000.0),
            MonitorVsClimb2000              => VsGuidance::preventive( -MAX_VS, -2000.0),

            Descend | DescendCross | DescendNow => VsGuidance::corrective( -1500.0, MAX_VS, -2000.0, -1500.0),
            DescendIncrease                 => VsGuidance::corrective( -2500.0, MAX_VS, -4400.0, -2500.0),
            DescendMaintainVs | DescendMaintainVsCrossing => VsGuidance::corrective( -1500.0, MAX_VS, -4400.0, -1500.0),
            LevelOff300Below                => VsGuidance::corrective( 0.0, MAX_VS, -300.0, 0.0),
            MonitorVsDescend0               => VsGuidance::preventive( 0.0, MAX_VS),
            MonitorVsDescend500             => VsGuidance::preventive( 500.0, MAX_VS),
            MonitorVsDescend1000            => VsGuidance::preventive( 1000.0, MAX_VS),
            MonitorVsDescend2000            => VsGuidance::preventive( 2000.0, MAX_VS),
        }
    }

    // the constructors used by the selector

    pub fn nominal (sense: RaSense, crossing: bool)->Self {
        match (sense, crossing) {
            (RaSense::Up, false) => RaVariant::Climb,
            (RaSense::Up, true) => RaVariant::ClimbCross,
            (RaSense::Down, false) => RaVariant::Descend,
            (RaSense::Down, true) => RaVariant::DescendCross,
        }
    }

    pub fn increase (sense: RaSense)->Self {
        match sense {
            RaSense::Up => RaVariant::ClimbIncrease,
            RaSense::Down => RaVariant::DescendIncrease,
        }
    }

    pub fn reversal (sense: RaSense)->Self {
        match sense {
            RaSense::Up => RaVariant::ClimbNow,
            RaSense::Down => RaVariant::DescendNow,
        }
    }

    pub fn maintain_vs (sense: RaSense, crossing: bool)->Self {
        match (sense, crossing) {
            (RaSense::Up, false) => RaVariant::ClimbMaintainVs,
            (RaSense::Up, true) => RaVariant::ClimbMaintainVsCrossing,
            (RaSense::Down, false) => RaVariant::DescendMaintainVs,
            (RaSense::Down, true) => RaVariant::DescendMaintainVsCrossing,
        }
    }

    pub fn level_off (sense: RaSense)->Self {
        match sense {
            RaSense::Up => RaVariant::LevelOff300Above,
            RaSense::Down => RaVariant::LevelOff300Below,
        }
    }

    /// the monitor vs advisory that limits the vertical speed against the sense to `limit` fpm (0,500,1000,2000)
    pub fn monitor_vs (sense: RaSense, limit: u32)->Option<Self> {
        use RaVariant::*;
        match (sense, limit) {
            (RaSense::Up, 0) => Some(MonitorVsClimb0),
            (RaSense::Up, 500) => Some(MonitorVsClimb500),
            (RaSense::Up, 1000) => Some(MonitorVsClimb1000),
            (RaSense::Up, 2000) => Some(MonitorVsClimb2000),
            (RaSense::Down, 0) => Some(MonitorVsDescend0),
            (RaSense::Down, 500) => Some(MonitorVsDescend500),
            (RaSense::Down, 1000) => Some(MonitorVsDescend1000),
            (RaSense::Down, 2000) => Some(MonitorVsDescend2000),
            _ => None
        }
    }
}

/// the (single) resolution advisory that is currently in effect
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct ResAdvisory {
    pub variant: RaVariant,
    pub is_reversal: bool,
    pub secs_since_start: f64,
    pub has_been_announced: bool,
}

impl ResAdvisory {
    pub fn new (variant: RaVariant)->Self {
        ResAdvisory { variant, is_reversal: false, secs_since_start: 0.0, has_been_announced: false }
    }

    /// continue with the same advisory, no new cue
    pub fn hold (&self)->Self {
        ResAdvisory { has_been_announced: true, ..*self }
    }

    /// replace the variant, keeping start time and reversal state. Needs to be announced
    pub fn revise (&self, variant: RaVariant)->Self {
        ResAdvisory { variant, has_been_announced: false, ..*self }
    }

    pub fn reverse (&self)->Self {
        let variant = RaVariant::reversal( self.variant.sense().opposite());
        ResAdvisory { variant, is_reversal: true, has_been_announced: false, ..*self }
    }

    pub fn sense (&self)->RaSense { self.variant.sense() }
    pub fn callout (&self)->Callout { self.variant.callout() }
    pub fn is_corrective (&self)->bool { self.variant.is_corrective() }
}

impl fmt::Display for ResAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "RA( {}, {}, {}", self.variant, self.sense(), self.variant.ra_type())?;
        if self.is_reversal { write!( f, ", reversal")?; }
        write!( f, ", t: {:.1}s )", self.secs_since_start)
    }
}
