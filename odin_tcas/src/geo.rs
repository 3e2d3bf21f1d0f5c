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

//! spherical earth approximations for the short ranges TCAS is concerned with.
//! Distances are in nautical miles, altitudes in feet, angles in degrees

use ::geo::{Bearing, Distance, Haversine, Point};
use uom::si::{f64::Length, length::{foot,meter,nautical_mile}};

#[inline]
pub fn feet_to_nm (ft: f64)->f64 { Length::new::<foot>(ft).get::<nautical_mile>() }

#[inline]
pub fn normalize_360 (d: f64)->f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

#[inline]
pub fn normalize_180 (d: f64)->f64 {
    let x = normalize_360(d);
    if x > 180.0 { x - 360.0 } else { x }
}

/// haversine great circle distance in nm
pub fn great_circle_distance (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    let dist = Haversine.distance( Point::new( lon1, lat1), Point::new( lon2, lat2));
    Length::new::<meter>(dist).get::<nautical_mile>()
}

/// initial great circle bearing from point 1 to point 2 in [0,360) degrees
pub fn great_circle_bearing (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    normalize_360( Haversine.bearing( Point::new( lon1, lat1), Point::new( lon2, lat2)))
}

/// 3D distance in nm from horizontal great circle distance and altitude difference
#[inline]
pub fn slant_distance (horizontal_nm: f64, dalt_ft: f64)->f64 {
    let v = feet_to_nm( dalt_ft);
    (horizontal_nm*horizontal_nm + v*v).sqrt()
}

/// horizontal position of a contact in the own-ship heading frame
#[derive(Debug,Clone,Copy,PartialEq,Default)]
pub struct RelativePosition {
    pub right: f64, // nm, positive to the right of own heading
    pub ahead: f64, // nm, positive in front
}

impl RelativePosition {
    pub fn from_polar (distance: f64, bearing: f64, heading: f64)->Self {
        let rel_brg = normalize_180( bearing - heading).to_radians();
        RelativePosition { right: distance * rel_brg.sin(), ahead: distance * rel_brg.cos() }
    }

    /// are we inside the ellipse that has `forward` and `back` semi-axes along the heading and `side` across.
    /// Points behind use the (usually shorter) `back` axis
    pub fn is_in_ellipse (&self, forward: f64, side: f64, back: f64)->bool {
        let a = if self.ahead >= 0.0 { forward } else { back };
        let x = self.right / side;
        let y = self.ahead / a;
        x*x + y*y <= 1.0
    }
}
