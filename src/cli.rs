use std::path::PathBuf;

use burrow_geom::{Ray, Vec3};
use clap::Parser;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "burrow", version, about = "Build and edit a ring cave headlessly")]
pub struct Args {
    /// Cave config (TOML). Built-in defaults when omitted.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Floors to dig before applying edits.
    #[arg(long, default_value_t = 1)]
    pub floors: usize,

    /// Set a segment's depth class.
    #[arg(long = "dig", value_name = "F:S:D", value_parser = parse_dig)]
    pub digs: Vec<DigEdit>,

    /// Place a building.
    #[arg(long = "build", value_name = "F:S:SIZE:REQ", value_parser = parse_build)]
    pub builds: Vec<BuildRequest>,

    /// Cast a ray against the cave.
    #[arg(long = "ray", value_name = "OX,OY,OZ:DX,DY,DZ", value_parser = parse_ray)]
    pub rays: Vec<Ray>,

    /// Remesh workers; overrides `[runtime] workers`.
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigEdit {
    pub floor: i32,
    pub segment: i32,
    pub depth: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildRequest {
    pub floor: i32,
    pub segment: i32,
    pub size: u32,
    pub requirement: u32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ArgError {
    #[error("expected {expected} `:`-separated fields, got `{got}`")]
    FieldCount { expected: usize, got: String },
    #[error("bad number `{0}`")]
    Number(String),
    #[error("expected `x,y,z`, got `{0}`")]
    Vector(String),
}

fn fields<const N: usize>(s: &str) -> Result<[&str; N], ArgError> {
    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    parts.try_into().map_err(|_| ArgError::FieldCount {
        expected: N,
        got: s.to_string(),
    })
}

fn num<T: std::str::FromStr>(s: &str) -> Result<T, ArgError> {
    s.parse().map_err(|_| ArgError::Number(s.to_string()))
}

fn vec3(s: &str) -> Result<Vec3, ArgError> {
    let v: Vec<f32> = s
        .split(',')
        .map(|c| c.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|_| ArgError::Vector(s.to_string()))?;
    match v[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(ArgError::Vector(s.to_string())),
    }
}

pub fn parse_dig(s: &str) -> Result<DigEdit, ArgError> {
    let [f, seg, d] = fields::<3>(s)?;
    Ok(DigEdit {
        floor: num(f)?,
        segment: num(seg)?,
        depth: num(d)?,
    })
}

pub fn parse_build(s: &str) -> Result<BuildRequest, ArgError> {
    let [f, seg, size, req] = fields::<4>(s)?;
    Ok(BuildRequest {
        floor: num(f)?,
        segment: num(seg)?,
        size: num(size)?,
        requirement: num(req)?,
    })
}

pub fn parse_ray(s: &str) -> Result<Ray, ArgError> {
    let [o, d] = fields::<2>(s)?;
    Ok(Ray::new(vec3(o)?, vec3(d)?))
}
