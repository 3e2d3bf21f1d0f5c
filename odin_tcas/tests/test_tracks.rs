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
    config::TcasConfig,
    telemetry::{OwnState,RawContact},
    track::{Intrusion,TrackManager,raw_range_tau,positive_or_infinite}
};

// run with "cargo test --test test_tracks -- --nocapture"

const DEG_PER_NM: f64 = 1.0 / 60.0;

fn own_ship ()->OwnState {
    OwnState::new( 0.0, 0.0, 8000.0, 8000.0, 0.0, 0.0)
}

fn contact_at (id: &str, range_nm: f64, alt: f64)->RawContact {
    RawContact::new( id, range_nm * DEG_PER_NM, 0.0, alt, 180.0)
}

#[test]
fn test_tau_rules () {
    assert!( positive_or_infinite(-1.0).is_infinite());
    assert!( positive_or_infinite(f64::NAN).is_infinite());
    assert_eq!( positive_or_infinite(12.5), 12.5);

    // no closure, outside of DMOD
    let tau = raw_range_tau( 2.0, 0.55, 0.0);
    println!("tau without closure: {tau}");
    assert!( positive_or_infinite(tau).is_infinite());

    let tau = raw_range_tau( 4.0, 0.55, 500.0);
    println!("tau at 4nm closing with 500kt: {tau}");
    assert!( tau > 27.0 && tau < 29.0);
}

#[test]
fn test_closing_and_diverging () {
    let config = Arc::new( TcasConfig::default());
    let params = config.sensitivity_params(5).unwrap().clone();
    let own = own_ship();
    let mut tm = TrackManager::new( config.clone());

    tm.ingest( &[contact_at("a", 4.0, 8500.0), contact_at("b", 2.0, 8000.0)], &own, &params, 1.0);
    assert_eq!( tm.len(), 2);
    for t in tm.tracks() {
        println!("new: {t}");
        assert!( t.ra_tau.is_infinite() && t.ta_tau.is_infinite());
    }

    // a closes with ~500kt and descends, b moves away
    tm.ingest( &[contact_at("a", 3.8611, 8450.0), contact_at("b", 2.1, 8000.0)], &own, &params, 1.0);

    let a = tm.get("a").unwrap();
    println!("closing: {a}");
    assert!( (a.closure_rate - 500.0).abs() < 10.0);
    assert!( (a.vertical_speed + 3000.0).abs() < 1.0);
    assert!( a.ra_tau.is_finite() && a.ra_tau > 0.0);
    assert!( a.ta_tau.is_finite() && a.ta_tau > 0.0 && a.ta_tau < a.ra_tau);
    assert!( a.v_tau.is_finite() && a.v_tau > 0.0);

    let b = tm.get("b").unwrap();
    println!("diverging: {b}");
    assert!( b.closure_rate < 0.0);
    assert!( b.ra_tau.is_infinite());
    assert!( b.ta_tau.is_infinite());
    assert!( b.v_tau.is_infinite()); // co-altitude without vertical rates
}

#[test]
fn test_invalid_contacts () {
    let config = Arc::new( TcasConfig::default());
    let params = config.sensitivity_params(5).unwrap().clone();
    let own = own_ship();
    let mut tm = TrackManager::new( config.clone());

    let no_data = RawContact::new( "zero", 0.0, 0.0, 0.0, 0.0);
    let mut no_alt = contact_at( "no_alt", 3.0, 8000.0);
    no_alt.alt = None;
    let mut nan_lat = contact_at( "nan_lat", 3.0, 8000.0);
    nan_lat.lat = Some(f64::NAN);
    let mut no_heading = contact_at( "no_heading", 3.0, 8000.0);
    no_heading.heading = None;

    tm.ingest( &[no_data, no_alt, nan_lat, no_heading], &own, &params, 1.0);
    assert_eq!( tm.len(), 1);
    let t = tm.get("no_heading").unwrap();
    assert_eq!( t.heading, 0.0);
}

#[test]
fn test_dead_tracks_are_purged () {
    let config = Arc::new( TcasConfig::default());
    let params = config.sensitivity_params(5).unwrap().clone();
    let own = own_ship();
    let mut tm = TrackManager::new( config.clone());

    tm.ingest( &[contact_at("a", 4.0, 8000.0), contact_at("b", 5.0, 8000.0)], &own, &params, 1.0);
    assert_eq!( tm.len(), 2);

    tm.ingest( &[contact_at("b", 4.9, 8000.0)], &own, &params, 1.0);
    assert_eq!( tm.len(), 1);
    assert!( tm.get("a").is_none());
    assert!( tm.get("b").unwrap().alive);
}

#[test]
fn test_memory_cap_keeps_most_urgent () {
    let config = Arc::new( TcasConfig::default());
    let params = config.sensitivity_params(5).unwrap().clone();
    let own = own_ship();
    let mut tm = TrackManager::new( config.clone());
    assert_eq!( config.memory_max, 40);

    let closing: Vec<RawContact> = (0..30).map( |i| contact_at( &format!("c{i}"), 5.0 + i as f64 * 0.1, 8000.0)).collect();
    tm.ingest( &closing, &own, &params, 1.0);
    assert_eq!( tm.len(), 30);

    // all known contacts close in by 0.1nm, plus 20 new ones (which don't have a finite tau yet)
    let mut contacts: Vec<RawContact> = (0..30).map( |i| contact_at( &format!("c{i}"), 4.9 + i as f64 * 0.1, 8000.0)).collect();
    for i in 0..20 {
        contacts.push( contact_at( &format!("n{i}"), 3.0 + i as f64 * 0.1, 8000.0));
    }
    tm.ingest( &contacts, &own, &params, 1.0);

    println!("kept {} tracks", tm.len());
    assert_eq!( tm.len(), 40);
    for i in 0..30 {
        let id = format!("c{i}");
        let t = tm.get(&id).unwrap();
        assert!( t.ra_tau.is_finite());
    }
    assert_eq!( tm.tracks().iter().filter( |t| t.id.starts_with("n")).count(), 10);
}
