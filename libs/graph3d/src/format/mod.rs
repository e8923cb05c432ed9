//! Line-oriented mesh text format.
//!
//! ```text
//! * comment
//! #ModelType#
//! 1000
//! #Points#
//! 3
//! 0.0000,0.0000,10.0000
//! ...
//! #Polygons#
//! 1
//! 0,1,2,   255,255,255,255,   255,255,255,255,   0.5000,0.5000,   0,   0
//! #Properties#
//! ClosedSurface=0
//! ```
//!
//! Polygon rows carry the three vertex indices, front and back ARGB colours,
//! front and back matte, the double-sided flag and the fill-type code.
//! Blank lines and lines starting with `*` are ignored everywhere; unknown
//! `#...#` sections are skipped. Properties other than `ClosedSurface` are
//! handed back to the caller, which is how shape generators persist their
//! parameters.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::core::color::Color;
use crate::core::point::Point3D;
use crate::error::{Graph3dError, Graph3dResult, ResultExt};
use crate::model::{FillType, ModelKind, Polygon3D, VolumetricModel};
use crate::primitives::Properties;

const POLYGON_FIELDS: usize = 15;

/// A parsed mesh file.
#[derive(Debug, Clone)]
pub struct MeshDocument {
    /// Value of the `#ModelType#` section.
    pub kind: ModelKind,
    /// The mesh, tagged with `kind`.
    pub model: VolumetricModel,
    /// `#Properties#` entries other than `ClosedSurface`, in file order.
    pub properties: Properties,
}

// =============================================================================
// WRITING
// =============================================================================

/// Writes `model` and the extra `properties` to `out`.
pub fn write_model<W: Write>(model: &VolumetricModel, properties: &[(String, String)], out: &mut W) -> Graph3dResult<()> {
    writeln!(out, "* graph3d mesh")?;
    writeln!(out, "#ModelType#")?;
    writeln!(out, "{}", model.kind().code())?;

    let points = model.vertices().main();
    writeln!(out, "#Points#")?;
    writeln!(out, "* X,Y,Z per line")?;
    writeln!(out, "{}", points.len())?;
    for p in points {
        writeln!(out, "{:.4},{:.4},{:.4}", p.x, p.y, p.z)?;
    }

    writeln!(out, "#Polygons#")?;
    writeln!(
        out,
        "* indices, front ARGB, back ARGB, front/back matte, double-sided, fill type"
    )?;
    writeln!(out, "{}", model.polygons().len())?;
    for p in model.polygons() {
        let [a, b, c] = p.indices;
        let [front, back] = p.color;
        writeln!(
            out,
            "{a},{b},{c},   {},{},{},{},   {},{},{},{},   {:.4},{:.4},   {},   {}",
            front.a,
            front.r,
            front.g,
            front.b,
            back.a,
            back.r,
            back.g,
            back.b,
            p.matte[0],
            p.matte[1],
            u8::from(p.double_sided),
            p.fill_type.code()
        )?;
    }

    writeln!(out, "#Properties#")?;
    writeln!(out, "ClosedSurface={}", u8::from(model.closed_surface()))?;
    for (key, value) in properties {
        writeln!(out, "{key}={value}")?;
    }
    Ok(())
}

/// Renders `model` and `properties` as mesh text.
///
/// # Examples
/// ```
/// use graph3d::format::{from_text, to_text};
/// use graph3d::primitives::Plane3D;
/// let plane = Plane3D::default();
/// let text = to_text(&plane.build().unwrap(), &plane.properties()).unwrap();
/// let doc = from_text(&text).unwrap();
/// assert_eq!(Plane3D::from_properties(&doc.properties).unwrap(), plane);
/// assert_eq!(doc.model.polygons().len(), 4);
/// ```
pub fn to_text(model: &VolumetricModel, properties: &[(String, String)]) -> Graph3dResult<String> {
    let mut buf = Vec::new();
    write_model(model, properties, &mut buf).context("format", "to_text")?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes a mesh file at `path`.
pub fn save_model(path: impl AsRef<Path>, model: &VolumetricModel, properties: &[(String, String)]) -> Graph3dResult<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_model(model, properties, &mut out)?;
    out.flush()?;
    debug!("saved {:?} model to {}", model.kind(), path.display());
    Ok(())
}

// =============================================================================
// READING
// =============================================================================

enum Section {
    ModelType,
    Points,
    Polygons,
    Properties,
    Skipped,
}

/// Content lines with their one-based line numbers.
struct ContentLines<R> {
    inner: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> ContentLines<R> {
    fn next_line(&mut self) -> Graph3dResult<Option<(usize, String)>> {
        for text in self.inner.by_ref() {
            let text = text?;
            self.line += 1;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('*') {
                continue;
            }
            return Ok(Some((self.line, trimmed.to_string())));
        }
        Ok(None)
    }

    fn expect_line(&mut self) -> Graph3dResult<(usize, String)> {
        let line = self.line;
        self.next_line()?
            .ok_or_else(|| format_error(line + 1, "unexpected end of file"))
    }
}

fn format_error(line: usize, message: impl Into<String>) -> Graph3dError {
    Graph3dError::Format {
        line,
        message: message.into(),
    }
}

fn parse<T: std::str::FromStr>(line: usize, field: &str, what: &str) -> Graph3dResult<T> {
    field
        .trim()
        .parse()
        .map_err(|_| format_error(line, format!("bad {what}: {:?}", field.trim())))
}

fn fields(line: usize, text: &str, expected: usize) -> Graph3dResult<Vec<&str>> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != expected {
        return Err(format_error(
            line,
            format!("expected {expected} fields, found {}", parts.len()),
        ));
    }
    Ok(parts)
}

fn parse_point(line: usize, text: &str) -> Graph3dResult<Point3D> {
    let f = fields(line, text, 3)?;
    Ok(Point3D::new(
        parse(line, f[0], "coordinate")?,
        parse(line, f[1], "coordinate")?,
        parse(line, f[2], "coordinate")?,
    ))
}

fn parse_color(line: usize, f: &[&str]) -> Graph3dResult<Color> {
    let channel = |s: &str| parse::<u8>(line, s, "colour channel");
    Ok(Color::from_argb(channel(f[0])?, channel(f[1])?, channel(f[2])?, channel(f[3])?))
}

fn parse_polygon(line: usize, text: &str) -> Graph3dResult<Polygon3D> {
    let f = fields(line, text, POLYGON_FIELDS)?;
    let mut p = Polygon3D::new([
        parse(line, f[0], "vertex index")?,
        parse(line, f[1], "vertex index")?,
        parse(line, f[2], "vertex index")?,
    ]);
    p.color = [parse_color(line, &f[3..7])?, parse_color(line, &f[7..11])?];
    p.matte = [parse(line, f[11], "matte")?, parse(line, f[12], "matte")?];
    p.double_sided = f[13].trim() == "1";
    let code: i32 = parse(line, f[14], "fill type")?;
    p.fill_type = FillType::from_code(code)
        .ok_or_else(|| format_error(line, format!("unknown fill type {code}")))?;
    Ok(p)
}

/// Parses mesh text from `reader`.
///
/// Fails with [`Graph3dError::Format`] naming the offending line, or with
/// [`Graph3dError::IndexOutOfRange`] when a polygon addresses a missing
/// vertex.
pub fn read_model<R: BufRead>(reader: R) -> Graph3dResult<MeshDocument> {
    let mut lines = ContentLines {
        inner: reader.lines(),
        line: 0,
    };
    let mut section = Section::Skipped;
    let mut kind = None;
    let mut points = None;
    let mut polygons = None;
    let mut closed = false;
    let mut properties = Properties::new();

    while let Some((line, text)) = lines.next_line()? {
        if text.starts_with('#') {
            section = match text.as_str() {
                "#ModelType#" => Section::ModelType,
                "#Points#" => Section::Points,
                "#Polygons#" => Section::Polygons,
                "#Properties#" => Section::Properties,
                _ => Section::Skipped,
            };
            continue;
        }
        match section {
            Section::ModelType => kind = Some(ModelKind::from_code(parse(line, &text, "model type")?)),
            Section::Points => {
                let count: usize = parse(line, &text, "point count")?;
                let mut rows = Vec::with_capacity(count);
                for _ in 0..count {
                    let (line, text) = lines.expect_line()?;
                    rows.push(parse_point(line, &text)?);
                }
                points = Some(rows);
            }
            Section::Polygons => {
                let count: usize = parse(line, &text, "polygon count")?;
                let mut rows = Vec::with_capacity(count);
                for _ in 0..count {
                    let (line, text) = lines.expect_line()?;
                    rows.push(parse_polygon(line, &text)?);
                }
                polygons = Some(rows);
            }
            Section::Properties => {
                // Lines without a key before `=` are not properties.
                let Some((key, value)) = text.split_once('=').filter(|(key, _)| !key.is_empty()) else {
                    continue;
                };
                let (key, value) = (key.trim(), value.trim());
                if value.is_empty() {
                    return Err(format_error(line, format!("malformed property {text:?}")));
                }
                if key == "ClosedSurface" {
                    closed = value == "1";
                } else {
                    properties.push((key.to_string(), value.to_string()));
                }
            }
            Section::Skipped => {}
        }
    }

    let end = lines.line;
    let kind = kind.ok_or_else(|| format_error(end, "missing #ModelType# section"))?;
    let points = points.ok_or_else(|| format_error(end, "missing #Points# section"))?;
    let polygons = polygons.ok_or_else(|| format_error(end, "missing #Polygons# section"))?;
    let model = VolumetricModel::from_parts(kind, points, polygons, closed)?;
    Ok(MeshDocument {
        kind,
        model,
        properties,
    })
}

/// Parses mesh text held in memory.
pub fn from_text(text: &str) -> Graph3dResult<MeshDocument> {
    read_model(text.as_bytes())
}

/// Reads a mesh file at `path`.
pub fn open_model(path: impl AsRef<Path>) -> Graph3dResult<MeshDocument> {
    let path = path.as_ref();
    let doc = read_model(BufReader::new(File::open(path)?))?;
    debug!("opened {:?} model from {}", doc.kind, path.display());
    Ok(doc)
}
