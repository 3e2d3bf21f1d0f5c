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

use std::path::Path;
use odin_tcas::{config::{AltReference,TcasConfig}, errors::OdinTcasError};

// run with "cargo test --test test_config -- --nocapture"

#[test]
fn test_default_config () {
    let config = TcasConfig::default();
    config.validate().unwrap();

    for level in 1..=8 {
        let p = config.sensitivity_params(level).unwrap();
        println!("{p:?}");
        assert_eq!( p.has_ra(), level > 2);
    }
}

#[test]
fn test_config_file () {
    let path = Path::new( env!("CARGO_MANIFEST_DIR")).join("configs/tcas.ron");
    let config = TcasConfig::from_ron_file( &path).unwrap();
    assert_eq!( config, TcasConfig::default());
}

#[test]
fn test_ron_roundtrip () {
    let config = TcasConfig::default();
    let s = ron::ser::to_string_pretty( &config, ron::ser::PrettyConfig::default()).unwrap();
    let config1 = TcasConfig::from_ron_bytes( s.as_bytes()).unwrap();
    assert_eq!( config, config1);
}

#[test]
fn test_invalid_config () {
    let mut config = TcasConfig::default();
    config.sensitivity.retain( |p| p.level != 5);
    let res = config.validate();
    println!("{res:?}");
    assert!( matches!( res, Err(OdinTcasError::ConfigError(_))));

    let mut config = TcasConfig::default();
    config.refresh_interval = 0.0;
    assert!( config.validate().is_err());

    assert!( TcasConfig::from_ron_bytes( b"TcasConfig( refresh_interval: 1.0 )").is_err());
}

#[test]
fn test_altitude_bands () {
    let config = TcasConfig::default();
    let band = config.sensitivity_params(3).unwrap().band.unwrap();
    assert_eq!( band.reference, AltReference::Radio);
    assert!( !band.contains( 1000.0, 5000.0)); // lower bound excluded
    assert!( band.contains( 2350.0, 5000.0));  // upper bound included
}
