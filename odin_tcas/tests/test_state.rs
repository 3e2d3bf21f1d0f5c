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
use odin_tcas::{
    advisory::{RaVariant,ResAdvisory},
    config::TcasConfig,
    inhibition::Inhibit,
    sound,
    state::{AdvisoryState,AdvisoryStateMachine,StateInput}
};

// run with "cargo test --test test_state -- --nocapture"

fn input (ta_count: usize, ra_count: usize, candidate: Option<ResAdvisory>)->StateInput {
    StateInput { ta_count, ra_count, inhibit: Inhibit::None, fault: false, candidate, dt: 1.0 }
}

fn state_machine ()->AdvisoryStateMachine {
    AdvisoryStateMachine::new( Arc::new( TcasConfig::default()))
}

#[test]
fn test_traffic_advisory () {
    let mut sm = state_machine();

    let requests = sm.update( input( 1, 0, None));
    assert_eq!( sm.state(), AdvisoryState::Ta);
    assert_eq!( requests.len(), 1);
    assert_eq!( requests[0].sound, sound::TRAFFIC_TRAFFIC);

    // no repeated cue while the TA persists
    let requests = sm.update( input( 1, 0, None));
    assert!( requests.is_empty());

    sm.update( input( 0, 0, None));
    assert_eq!( sm.state(), AdvisoryState::None);

    // aural TA inhibited at low altitude
    let requests = sm.update( StateInput { inhibit: Inhibit::AllRaAuralTa, ..input( 1, 0, None) });
    assert_eq!( sm.state(), AdvisoryState::Ta);
    assert!( requests.is_empty());
}

#[test]
fn test_resolution_advisory () {
    let mut sm = state_machine();
    sm.update( input( 1, 0, None));

    let requests = sm.update( input( 0, 1, Some( ResAdvisory::new( RaVariant::Climb))));
    assert_eq!( sm.state(), AdvisoryState::Ra);
    assert_eq!( requests.len(), 1);
    assert_eq!( requests[0].sound, sound::CLIMB_CLIMB);
    assert!( requests[0].repeat); // corrective

    let ra = sm.active().unwrap();
    println!("{ra}");
    assert!( ra.has_been_announced);
    assert_eq!( ra.secs_since_start, 1.0);

    let guidance = sm.guidance().unwrap();
    assert!( guidance.corrective);
    assert!( guidance.green.is_some());

    // held advisory is not announced again but keeps counting
    let held = sm.active().unwrap().hold();
    let requests = sm.update( input( 0, 1, Some(held)));
    assert!( requests.is_empty());
    assert_eq!( sm.active().unwrap().secs_since_start, 2.0);

    // preventive revision is announced once, without repeat and green band
    let revised = sm.active().unwrap().revise( RaVariant::MonitorVsClimb0);
    let requests = sm.update( input( 0, 1, Some(revised)));
    assert_eq!( requests.len(), 1);
    assert!( !requests[0].repeat);
    assert!( sm.guidance().unwrap().green.is_none());
}

#[test]
fn test_clear_of_conflict () {
    let mut sm = state_machine();
    sm.update( input( 0, 1, Some( ResAdvisory::new( RaVariant::Descend))));
    assert_eq!( sm.state(), AdvisoryState::Ra);

    let requests = sm.update( input( 1, 0, None));
    assert_eq!( sm.state(), AdvisoryState::Ta);
    assert_eq!( requests.len(), 1);
    assert_eq!( requests[0].sound, sound::CLEAR_OF_CONFLICT);
    assert!( sm.active().is_none());
    assert!( sm.guidance().is_none());

    sm.update( input( 0, 1, Some( ResAdvisory::new( RaVariant::Descend))));
    sm.update( input( 0, 0, None));
    assert_eq!( sm.state(), AdvisoryState::None);
}

#[test]
fn test_fault_and_inhibition () {
    let mut sm = state_machine();

    // no RA while RAs are inhibited
    sm.update( StateInput { inhibit: Inhibit::AllRa, ..input( 1, 1, Some( ResAdvisory::new( RaVariant::Climb))) });
    assert_eq!( sm.state(), AdvisoryState::Ta);
    assert!( sm.active().is_none());

    sm.update( input( 1, 1, Some( ResAdvisory::new( RaVariant::Climb))));
    assert_eq!( sm.state(), AdvisoryState::Ra);

    // a fault drops the RA without clear of conflict
    let requests = sm.update( StateInput { fault: true, ..input( 1, 1, None) });
    assert_eq!( sm.state(), AdvisoryState::Ta);
    assert!( requests.is_empty());
    assert!( sm.active().is_none());
}
