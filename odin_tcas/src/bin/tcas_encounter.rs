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

use std::{path::PathBuf, time::Duration};
use tokio::{self, sync::mpsc, time::interval};
use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing::{debug,info};

use odin_tcas::{
    TcasComputer,
    config::TcasConfig,
    display::TcasReport,
    telemetry::{ChannelTelemetrySource,OwnState,RawContact},
};

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = "run a synthetic head-on encounter through the collision avoidance logic and print JSON reports")]
pub struct Args {
    /// RON config file (default configuration if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// own-ship pressure altitude in ft
    #[arg(long, default_value_t = 8000.0)]
    pub own_alt: f64,

    /// own-ship vertical speed in fpm
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub own_vs: f64,

    /// own-ship ground speed in kt
    #[arg(long, default_value_t = 250.0)]
    pub own_speed: f64,

    /// initial range of the intruder (straight ahead) in nm
    #[arg(long, default_value_t = 6.0)]
    pub range: f64,

    /// initial intruder altitude relative to own-ship in ft
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub rel_alt: f64,

    /// intruder vertical speed in fpm
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub intruder_vs: f64,

    /// intruder ground speed in kt
    #[arg(long, default_value_t = 250.0)]
    pub intruder_speed: f64,

    /// encounter duration in simulated seconds
    #[arg(short,long, default_value_t = 60.0)]
    pub duration: f64,

    /// wall clock milliseconds per simulated second
    #[arg(long, default_value_t = 100)]
    pub step_ms: u64,
}

const DEG_PER_NM: f64 = 1.0 / 60.0;
const PILOT_ACCEL: f64 = 8.0 * 60.0; // fpm per second (~0.25g)

/// straight and level (or constant vs) intruder coming towards us from the north
async fn run_intruder (args: Args, tx: mpsc::Sender<Vec<RawContact>>) {
    let mut ticker = interval( Duration::from_millis( args.step_ms));
    let mut t = 0.0;

    while t <= args.duration {
        ticker.tick().await;

        let lat = (args.range - args.intruder_speed * t / 3600.0) * DEG_PER_NM;
        let alt = args.own_alt + args.rel_alt + args.intruder_vs * t / 60.0;
        let contact = RawContact::new( "intruder", lat, 0.0, alt, 180.0);

        if tx.send( vec![contact]).await.is_err() { break }
        t += 1.0;
    }
    debug!("intruder feed terminated");
}

/// the vertical speed a (compliant) pilot would target for the published guidance
fn target_vs (report: &TcasReport, vs: f64)->f64 {
    match &report.guidance {
        Some(g) => match g.green {
            Some(green) => {
                if green.contains(vs) { vs } else if vs < green.min { green.min } else { green.max }
            }
            None => {
                if !g.red.contains(vs) { vs } else if g.red.min <= -6000.0 { g.red.max } else { g.red.min }
            }
        }
        None => vs
    }
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TcasConfig::from_ron_file( path)?,
        None => TcasConfig::default()
    };
    let mut tcas = TcasComputer::new( config)?;

    let (tx, mut source) = ChannelTelemetrySource::with_capacity( 16);
    let intruder = tokio::spawn( run_intruder( args.clone(), tx));

    let mut ticker = interval( Duration::from_millis( args.step_ms));
    let mut t = 0.0;
    let mut own_alt = args.own_alt;
    let mut own_vs = args.own_vs;
    let mut target = own_vs;

    while t <= args.duration {
        ticker.tick().await;

        let lat = (args.own_speed * t / 3600.0) * DEG_PER_NM;
        let own = OwnState::new( lat, 0.0, own_alt, own_alt, own_vs, 0.0);
        let update = tcas.update_from( Duration::from_secs(1), &own, &mut source);

        if let Some(report) = &update.report {
            target = target_vs( report, own_vs);
        }
        println!("{}", json!({ "t": t, "own_alt": own_alt, "own_vs": own_vs, "update": update }));

        // pilot response and own-ship kinematics for the next second
        let dvs = (target - own_vs).clamp( -PILOT_ACCEL, PILOT_ACCEL);
        own_alt += (own_vs + dvs / 2.0) / 60.0;
        own_vs += dvs;
        t += 1.0;
    }

    intruder.abort();
    info!("encounter finished");
    Ok(())
}
