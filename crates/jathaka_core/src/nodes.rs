//! Lunar node (Rahu/Ketu) longitude computation.
//!
//! Rahu is the Moon's ascending node; Ketu is always Rahu + 180 deg.
//! Both are tropical ecliptic longitudes; the sidereal conversion happens
//! downstream with the chart's ayanamsha.
//!
//! Mean node: Meeus polynomial (see [`crate::fundamental::mean_node_deg`]).
//! True node: mean + 13 short-period terms from Meeus, Chapter 47.

use jathaka_time::normalize_360 as normalize_deg;
use serde::{Deserialize, Serialize};

use crate::fundamental::{LunarArguments, lunar_arguments, mean_node_deg};

/// Which lunar node to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunarNode {
    /// Ascending node (Rahu / North Node).
    Rahu,
    /// Descending node (Ketu / South Node).
    Ketu,
}

/// Mean or true (perturbed) node position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeMode {
    /// Smooth polynomial motion only.
    #[default]
    Mean,
    /// Mean + short-period perturbation corrections.
    True,
}

/// Mean Rahu longitude in degrees [0, 360). `t` = Julian centuries since J2000.
pub fn mean_rahu_deg(t: f64) -> f64 {
    mean_node_deg(t)
}

/// Sum of the short-period node corrections, in degrees.
fn node_perturbation_deg(args: &LunarArguments) -> f64 {
    // [nM', nM, nF, nD, nOmega, amplitude_deg]
    #[rustfmt::skip]
    static TERMS: [[f64; 6]; 13] = [
        [ 0.0,  0.0,  0.0,  0.0,  1.0, -1.4979],
        [ 0.0,  0.0,  2.0, -2.0,  0.0,  0.1500],
        [ 0.0,  0.0,  2.0,  0.0,  0.0, -0.1226],
        [ 0.0,  0.0,  0.0,  0.0,  2.0,  0.1176],
        [ 1.0,  0.0,  0.0,  0.0,  0.0, -0.0801],
        [ 0.0,  1.0,  0.0,  0.0,  0.0,  0.0056],
        [ 0.0,  0.0,  2.0,  0.0, -2.0, -0.0047],
        [ 1.0,  0.0,  2.0,  0.0,  0.0, -0.0043],
        [ 0.0,  0.0,  2.0, -2.0,  2.0,  0.0040],
        [ 0.0,  1.0,  0.0,  0.0, -1.0,  0.0037],
        [ 0.0,  0.0,  0.0,  2.0,  0.0, -0.0030],
        [ 2.0,  0.0,  0.0,  0.0,  0.0, -0.0020],
        [ 0.0,  1.0,  2.0, -2.0,  0.0,  0.0015],
    ];

    let mp = args.moon_anomaly.to_radians();
    let m = args.sun_anomaly.to_radians();
    let f = args.latitude_argument.to_radians();
    let d = args.elongation.to_radians();
    let om = args.node.to_radians();

    TERMS
        .iter()
        .map(|t| t[5] * (t[0] * mp + t[1] * m + t[2] * f + t[3] * d + t[4] * om).sin())
        .sum()
}

/// True Rahu longitude in degrees [0, 360).
pub fn true_rahu_deg(t: f64) -> f64 {
    let args = lunar_arguments(t);
    normalize_deg(args.node + node_perturbation_deg(&args))
}

/// Longitude of a node in degrees [0, 360).
pub fn lunar_node_deg(node: LunarNode, t: f64, mode: NodeMode) -> f64 {
    let rahu = match mode {
        NodeMode::Mean => mean_rahu_deg(t),
        NodeMode::True => true_rahu_deg(t),
    };
    match node {
        LunarNode::Rahu => rahu,
        LunarNode::Ketu => normalize_deg(rahu + 180.0),
    }
}
