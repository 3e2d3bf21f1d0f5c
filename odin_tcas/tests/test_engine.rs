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

use std::{sync::Arc, time::Duration};
use odin_tcas::{
    TcasComponent, TcasComputer, TcasUpdate,
    advisory::RaVariant,
    config::TcasConfig,
    display::TcasReport,
    errors::OdinTcasError,
    selector::OwnVertical,
    sound,
    state::AdvisoryState,
    telemetry::{ChannelTelemetrySource,OwnState,RawContact,TcasMode,TelemetryPoll},
    throttle::UpdateThrottler,
    track::Intrusion
};

// run with "cargo test --test test_engine -- --nocapture"

const DEG_PER_NM: f64 = 1.0 / 60.0;
const SEC: Duration = Duration::from_secs(1);

fn own_ship ()->OwnState {
    OwnState::new( 0.0, 0.0, 8000.0, 8000.0, 0.0, 0.0)
}

/// head-on co-altitude intruder closing with 500kt from 4nm
fn head_on (t: f64)->Vec<RawContact> {
    let range = 4.0 - 500.0 * t / 3600.0;
    vec![ RawContact::new( "intruder", range * DEG_PER_NM, 0.0, 8000.0, 180.0) ]
}

fn tcas ()->TcasComputer {
    TcasComputer::new( TcasConfig::default()).unwrap()
}

fn report (update: &TcasUpdate)->&TcasReport {
    update.report.as_ref().unwrap()
}

#[test]
fn test_head_on_encounter () {
    let mut tcas = tcas();
    let own = own_ship();
    let mut ra_tick = None;

    for i in 0..15 {
        let update = tcas.update( SEC, &own, TelemetryPoll::Ready( head_on( i as f64)));
        let r = report( &update);
        println!("{i}: {} {:?} sounds: {:?}", r.state, r.advisory.map( |ra| ra.variant), update.sounds_started);

        if r.state == AdvisoryState::Ra {
            let ra = r.advisory.unwrap();
            assert!( matches!( ra.variant, RaVariant::Climb | RaVariant::Descend));
            let guidance = r.guidance.unwrap();
            assert!( guidance.corrective);
            assert!( guidance.green.is_some());
            assert_eq!( update.sound_requests.len(), 1);
            assert_eq!( update.sound_requests[0].sound, ra.callout().sound());
            assert_eq!( r.status.sensitivity, 5);

            // the chosen sense has to achieve ALIM at CPA
            let params = tcas.config().sensitivity_params( r.status.sensitivity).unwrap();
            let traj = &tcas.config().trajectory;
            let ra_tracks = tcas.tracks().ra_tracks();
            let target_vs = ra.sense().sign() * traj.nominal_rate;
            let (sep, _) = OwnVertical::from_own_state( &own)
                .maneuver_sep( &ra_tracks, ra.sense(), target_vs, traj.initial_delay, traj.initial_accel, traj.crossing_margin);
            println!("separation at CPA: {sep:.0}ft, ALIM: {}ft", params.alim);
            assert!( sep >= params.alim);

            ra_tick = Some(i);
            break;
        }
    }

    println!("RA at tick {ra_tick:?}");
    assert!( ra_tick.is_some_and( |i| i <= 10));
    assert_eq!( tcas.sensitivity_level(), 5);
}

#[test]
fn test_traffic_advisory_only () {
    let mut tcas = tcas();
    let own = own_ship();
    let contacts = vec![ RawContact::new( "ta", 0.65 * DEG_PER_NM, 0.0, 8700.0, 90.0) ];

    let update = tcas.update( SEC, &own, TelemetryPoll::Ready( contacts.clone()));
    let r = report( &update);
    assert_eq!( r.state, AdvisoryState::Ta);
    assert_eq!( update.sounds_started, vec![sound::TRAFFIC_TRAFFIC]);
    assert_eq!( r.traffic.len(), 1);
    assert_eq!( r.traffic[0].intrusion, Intrusion::Ta);
    assert_eq!( r.traffic[0].rel_alt, 7);

    for _ in 0..5 {
        let update = tcas.update( SEC, &own, TelemetryPoll::Ready( contacts.clone()));
        let r = report( &update);
        assert_eq!( r.state, AdvisoryState::Ta);
        assert!( r.advisory.is_none());
        assert!( r.guidance.is_none());
        assert!( update.sound_requests.is_empty());
    }
}

#[test]
fn test_clear_of_conflict_when_contact_vanishes () {
    let mut tcas = tcas();
    let own = own_ship();

    let mut i = 0;
    while tcas.advisory_state() != AdvisoryState::Ra {
        tcas.update( SEC, &own, TelemetryPoll::Ready( head_on( i as f64)));
        i += 1;
        assert!( i < 15);
    }

    // within the minimum RA duration, but there is no RA track left
    let update = tcas.update( SEC, &own, TelemetryPoll::Ready( Vec::new()));
    let r = report( &update);
    assert_eq!( r.state, AdvisoryState::None);
    assert!( r.advisory.is_none());
    assert!( update.sound_requests.iter().any( |req| req.sound == sound::CLEAR_OF_CONFLICT));
}

#[test]
fn test_fault_suppresses_ra () {
    let mut tcas = tcas();
    let mut own = own_ship();
    own.adr_alt_standby = None;

    for i in 0..15 {
        let update = tcas.update( SEC, &own, TelemetryPoll::Ready( head_on( i as f64)));
        let r = report( &update);
        assert!( r.status.fault);
        assert_ne!( r.state, AdvisoryState::Ra);
        assert!( r.advisory.is_none());
    }
    // tracking and display go on
    assert_eq!( tcas.tracks().len(), 1);
}

#[test]
fn test_standby () {
    let mut tcas = tcas();
    let mut own = own_ship();
    own.tcas_mode = TcasMode::Stby;

    let update = tcas.update( SEC, &own, TelemetryPoll::Ready( head_on( 0.0)));
    let r = report( &update);
    assert!( r.status.standby);
    assert!( r.traffic.is_empty());
    assert_eq!( tcas.tracks().len(), 0);
}

#[test]
fn test_throttling () {
    let mut tcas = tcas();
    let own = own_ship();
    let half = Duration::from_millis(500);

    let update = tcas.update( half, &own, TelemetryPoll::Ready( head_on( 0.0)));
    assert!( update.report.is_none());
    assert_eq!( tcas.tracks().len(), 0);

    let update = tcas.update( half, &own, TelemetryPoll::Ready( head_on( 0.0)));
    assert!( update.report.is_some());
    assert_eq!( tcas.tracks().len(), 1);
}

#[test]
fn test_throttle_configuration () {
    let mut config = TcasConfig::default();
    config.refresh_interval = 0.25;
    let config = Arc::new( config);

    let mut throttler = UpdateThrottler::new( 1.0);
    throttler.configure( config.clone());
    assert_eq!( throttler.interval(), 0.25);

    assert!( throttler.tick( 0.2).is_none());
    let dt = throttler.tick( 0.1).unwrap();
    assert!( (dt - 0.3).abs() < 1e-9);

    assert!( throttler.tick( 0.2).is_none());
    throttler.reset();
    assert!( throttler.tick( 0.2).is_none()); // accumulated time is dropped on reset

    // the engine forwards new configurations to its throttler
    let mut tcas = tcas();
    let own = own_ship();
    tcas.configure( config.as_ref().clone()).unwrap();
    let update = tcas.update( Duration::from_millis(300), &own, TelemetryPoll::Pending);
    assert!( update.report.is_some());
}

#[test]
fn test_telemetry_gaps_keep_tracks () {
    let mut tcas = tcas();
    let own = own_ship();

    tcas.update( SEC, &own, TelemetryPoll::Ready( head_on( 0.0)));
    tcas.update( SEC, &own, TelemetryPoll::Pending);
    tcas.update( SEC, &own, TelemetryPoll::Unavailable( OdinTcasError::TelemetryError("link down".to_string())));
    assert_eq!( tcas.tracks().len(), 1);

    // the rates cover the whole gap
    tcas.update( SEC, &own, TelemetryPoll::Ready( head_on( 3.0)));
    let t = tcas.tracks().get("intruder").unwrap();
    println!("{t}");
    assert!( (t.closure_rate - 500.0).abs() < 10.0);
}

#[test]
fn test_display_list () {
    let mut tcas = tcas();
    let own = own_ship();
    let contacts: Vec<RawContact> = (0..12).map( |i| {
        RawContact::new( format!("c{i}"), (6.5 - i as f64 * 0.5) * DEG_PER_NM, 0.0, 10000.0, 180.0)
    }).collect();

    let update = tcas.update( SEC, &own, TelemetryPoll::Ready( contacts));
    let r = report( &update);
    for t in &r.traffic { println!("{t:?}"); }

    assert_eq!( r.traffic.len(), 8);
    assert!( r.traffic.windows(2).all( |w| w[0].slant_distance <= w[1].slant_distance));
    assert_eq!( r.traffic[0].id.as_str(), "c11");
    assert_eq!( r.traffic[0].rel_alt, 20);
}

#[test]
fn test_display_order_by_urgency () {
    let mut tcas = tcas();
    let own = own_ship();
    let contacts = |t: f64| vec![
        RawContact::new( "near", 2.0 * DEG_PER_NM, 0.0, 9000.0, 0.0),
        RawContact::new( "fast", (3.8 + 500.0 * (1.0 - t) / 3600.0) * DEG_PER_NM, 0.0, 9000.0, 180.0),
    ];

    // first sighting has no rates, so only the distance counts
    let update = tcas.update( SEC, &own, TelemetryPoll::Ready( contacts( 0.0)));
    let r = report( &update);
    assert_eq!( r.traffic.len(), 2);
    assert_eq!( r.traffic[0].id.as_str(), "near");

    let update = tcas.update( SEC, &own, TelemetryPoll::Ready( contacts( 1.0)));
    let r = report( &update);
    for t in &r.traffic { println!("{t:?}"); }

    let fast = tcas.tracks().get("fast").unwrap();
    let near = tcas.tracks().get("near").unwrap();
    assert!( fast.ra_tau.is_finite());
    assert!( near.ra_tau.is_infinite());
    assert!( fast.slant_distance > near.slant_distance);

    assert_eq!( r.traffic.len(), 2);
    assert_eq!( r.traffic[0].id.as_str(), "fast");
    assert_eq!( r.traffic[1].id.as_str(), "near");
}

#[tokio::test]
async fn test_channel_source () {
    let mut tcas = tcas();
    let own = own_ship();
    let (tx, mut source) = ChannelTelemetrySource::with_capacity( 4);

    let update = tcas.update_from( SEC, &own, &mut source);
    assert_eq!( tcas.tracks().len(), 0);

    tx.send( head_on( 0.0)).await.unwrap();
    tx.send( head_on( 1.0)).await.unwrap(); // latest snapshot wins
    tcas.update_from( SEC, &own, &mut source);
    assert_eq!( tcas.tracks().len(), 1);

    drop(tx);
    tcas.update_from( SEC, &own, &mut source); // closed channel, tracks are kept
    assert_eq!( tcas.tracks().len(), 1);
}
