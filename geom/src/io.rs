//! Mesh loading from Wavefront OBJ files.
//!
//! Supported records:
//!
//! Record | Fields            | Meaning
//! ------ | ----------------- | -------
//! `v`    | `x y z [w]`       | vertex position, `w` defaults to 1
//! `vt`   | `u [v [w]]`       | texture coordinates, missing ones are 0
//! `vn`   | `i j k`           | vertex normal, normalized on load
//! `f`    | `v[/vt][/vn] ...` | face of three or more vertices
//!
//! Indices are 1-based, or negative to count back from the latest element
//! of the same kind. Faces with more than three vertices are triangulated
//! as a fan around their first vertex. Comments starting with `#` and blank
//! lines are skipped. Any other record (`o`, `g`, `s`, `usemtl`, ...) is
//! ignored.

use core::fmt::{self, Display, Formatter};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use gc::geom::{BLANK, Mesh, Tri, face_normal, vertex};
use gc::math::{Vec3, Vec4, pt3, vec3, vec4};
use gc::render::Model;

use Error::*;
use Malformed::*;

/// Error during loading or parsing an OBJ file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The file does not exist.
    ResourceNotFound(PathBuf),
    /// Another I/O error occurred.
    Io(io::ErrorKind),
    /// A record could not be parsed.
    MalformedRecord {
        /// The 1-based line number of the record.
        line: usize,
        kind: Malformed,
    },
}

/// The ways a record can be malformed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Malformed {
    /// A required field is missing.
    MissingField,
    /// A field is not a valid number.
    InvalidNumber(String),
    /// A face refers to an element that does not exist.
    IndexOutOfBounds(i64),
    /// A face has fewer than three vertices.
    TooFewVertices(usize),
}

/// Result of loading or parsing an OBJ file.
pub type Result<T> = core::result::Result<T, Error>;

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ResourceNotFound(path) => {
                write!(f, "mesh file not found: {}", path.display())
            }
            Io(kind) => write!(f, "error reading mesh file: {kind}"),
            MalformedRecord { line, kind } => {
                write!(f, "malformed record on line {line}: {kind}")
            }
        }
    }
}

impl Display for Malformed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MissingField => f.write_str("missing field"),
            InvalidNumber(s) => write!(f, "invalid number {s:?}"),
            IndexOutOfBounds(i) => write!(f, "index {i} out of bounds"),
            TooFewVertices(n) => write!(f, "face has only {n} vertices"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Io(e.kind())
    }
}

type Parsed<T> = core::result::Result<T, Malformed>;

/// One corner of a face, as resolved 0-based indices.
#[derive(Copy, Clone, Debug)]
struct Corner {
    pos: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

#[derive(Default)]
struct Parser {
    positions: Vec<Vec4<Model>>,
    uvs: Vec<Vec3>,
    normals: Vec<Vec4>,
    mesh: Mesh,
}

/// Loads a mesh from the OBJ file at `path`.
///
/// # Errors
/// Returns [`Error::ResourceNotFound`] if the file does not exist, and
/// other variants of [`Error`] if it cannot be read or parsed.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ResourceNotFound(path.to_path_buf()),
        kind => Io(kind),
    })?;
    let mesh = read_obj(BufReader::new(file))?;
    log::info!("loaded {} faces from {}", mesh.len(), path.display());
    Ok(mesh)
}

/// Parses a mesh in OBJ format from `input`.
///
/// The face normal of each triangle is computed from its vertex
/// positions. Vertices with no texture coordinates get zero coordinates,
/// and vertices with no normal get the face normal.
///
/// # Errors
/// Returns [`Error::MalformedRecord`] on the first record that cannot be
/// parsed, or [`Error::Io`] if reading fails.
///
/// # Examples
/// ```
/// use glyphcast_geom::io::read_obj;
///
/// let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
/// let mesh = read_obj(obj.as_bytes()).unwrap();
/// assert_eq!(mesh.len(), 2);
/// ```
pub fn read_obj(input: impl BufRead) -> Result<Mesh> {
    let mut p = Parser::default();
    for (i, line) in input.lines().enumerate() {
        p.parse_line(&line?)
            .map_err(|kind| MalformedRecord { line: i + 1, kind })?;
    }
    Ok(p.mesh)
}

impl Parser {
    fn parse_line(&mut self, line: &str) -> Parsed<()> {
        let line = line.split('#').next().unwrap_or_default();
        let mut fields = line.split_whitespace();
        let Some(record) = fields.next() else {
            return Ok(());
        };
        match record {
            "v" => {
                let [x, y, z] = parse_floats(&mut fields)?;
                let w = fields.next().map(parse_float).transpose()?;
                self.positions.push(vec4(x, y, z, w.unwrap_or(1.0)));
            }
            "vt" => {
                let u = parse_float(fields.next().ok_or(MissingField)?)?;
                let v = fields.next().map(parse_float).transpose()?;
                let w = fields.next().map(parse_float).transpose()?;
                self.uvs
                    .push(vec3(u, v.unwrap_or(0.0), w.unwrap_or(0.0)));
            }
            "vn" => {
                let [i, j, k] = parse_floats(&mut fields)?;
                let n = pt3(i, j, k).with_w(0.0);
                let n = n.try_normalize().unwrap_or_else(|| {
                    log::warn!("zero-length vertex normal: {line:?}");
                    Vec4::zero()
                });
                self.normals.push(n);
            }
            "f" => {
                let corners = fields
                    .map(|f| self.parse_corner(f))
                    .collect::<Parsed<Vec<_>>>()?;
                if corners.len() < 3 {
                    return Err(TooFewVertices(corners.len()));
                }
                for w in 1..corners.len() - 1 {
                    let face = [corners[0], corners[w], corners[w + 1]];
                    let tri = self.make_tri(face);
                    self.mesh.push(tri);
                }
            }
            other => log::trace!("ignoring record {other:?}"),
        }
        Ok(())
    }

    fn parse_corner(&self, field: &str) -> Parsed<Corner> {
        let mut idx = field.split('/');
        let pos = idx.next().ok_or(MissingField)?;
        let pos = resolve(pos, self.positions.len())?;
        let mut opt = |len| match idx.next() {
            None | Some("") => Ok(None),
            Some(s) => resolve(s, len).map(Some),
        };
        let uv = opt(self.uvs.len())?;
        let normal = opt(self.normals.len())?;
        Ok(Corner { pos, uv, normal })
    }

    fn make_tri(&self, corners: [Corner; 3]) -> Tri<Model> {
        let ps = corners.map(|c| self.positions[c.pos]);
        let n: Vec4 = face_normal(&ps).unwrap_or_default().to();
        let vs = corners.map(|c| {
            vertex(
                self.positions[c.pos],
                c.uv.map_or(vec3(0.0, 0.0, 0.0), |i| self.uvs[i]),
                c.normal.map_or(n, |i| self.normals[i]),
            )
        });
        Tri::new(vs, n, BLANK)
    }
}

/// Converts a 1-based or negative OBJ index into a 0-based index into a
/// list of `len` elements.
fn resolve(s: &str, len: usize) -> Parsed<usize> {
    let i: i64 = s.parse().map_err(|_| InvalidNumber(s.into()))?;
    let len = len as i64;
    let j = match i {
        1.. => i - 1,
        ..0 => len + i,
        0 => -1,
    };
    if (0..len).contains(&j) {
        Ok(j as usize)
    } else {
        Err(IndexOutOfBounds(i))
    }
}

fn parse_float(s: &str) -> Parsed<f32> {
    s.parse().map_err(|_| InvalidNumber(s.into()))
}

fn parse_floats<'a, const N: usize>(
    fields: &mut impl Iterator<Item = &'a str>,
) -> Parsed<[f32; N]> {
    let mut res = [0.0; N];
    for r in &mut res {
        *r = parse_float(fields.next().ok_or(MissingField)?)?;
    }
    Ok(res)
}
