// ---------------------------------------------------------------------------
// Serialization: SaveData, capture from a live town, text encode/decode
// ---------------------------------------------------------------------------
//
// Layout, one record per line:
//
//   1                                  format version
//   <cam_x> <cam_y> <zoom> <world name>
//   <x> <y> <road type> <x> <y> <road type> ...
//   <x> <y> <angle index> <building type> <shape> <variant>...
//   ...
//
// Appearance tokens are the unrotated variant names of the shape's filled
// cells in row-major (x, y, z) order.

use std::str::FromStr;

use town::camera::Viewport;
use town::catalog::Catalogs;
use town::rotation::Rotation;
use town::town::Town;

use crate::file_header::{header_line, parse_header, SAVE_FORMAT_VERSION};
use crate::save_error::SaveError;

/// Line number of the first building record.
pub const FIRST_BUILDING_LINE: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRecord {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl CameraRecord {
    /// Moves `viewport` to the saved position, keeping its screen size.
    pub fn apply(&self, viewport: &mut Viewport) {
        viewport.center.x = self.x;
        viewport.center.y = self.y;
        viewport.zoom = self.zoom;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadRecord {
    pub x: i32,
    pub y: i32,
    pub road_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingRecord {
    /// Line of the save text the record came from, for error reports.
    pub line: usize,
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
    pub building_type: String,
    pub shape: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveData {
    pub version: u32,
    pub world_name: String,
    pub camera: CameraRecord,
    pub roads: Vec<RoadRecord>,
    pub buildings: Vec<BuildingRecord>,
}

// ---------------------------------------------------------------------------
// Capture
// ---------------------------------------------------------------------------

impl SaveData {
    /// Snapshot of the committed state. Pending placements are not saved.
    pub fn capture(town: &Town, viewport: &Viewport, catalogs: &Catalogs) -> Self {
        let roads = town
            .grid()
            .roads()
            .into_iter()
            .map(|road| RoadRecord {
                x: road.x,
                y: road.y,
                road_type: catalogs.road_types.get(road.road_type).name.clone(),
            })
            .collect();

        let buildings = town
            .buildings()
            .iter()
            .enumerate()
            .map(|(i, building)| {
                let archetype = catalogs.building_types.get(building.building_type);
                BuildingRecord {
                    line: FIRST_BUILDING_LINE + i,
                    x: building.x,
                    y: building.y,
                    rotation: building.rotation,
                    building_type: archetype.name().to_string(),
                    shape: archetype.shape_name(&building.appearance).to_string(),
                    tokens: archetype.appearance_tokens(&catalogs.blocks, &building.appearance),
                }
            })
            .collect();

        Self {
            version: SAVE_FORMAT_VERSION,
            world_name: town.name.clone(),
            camera: CameraRecord {
                x: viewport.center.x,
                y: viewport.center.y,
                zoom: viewport.zoom,
            },
            roads,
            buildings,
        }
    }

    // -----------------------------------------------------------------------
    // Encode
    // -----------------------------------------------------------------------

    pub fn encode(&self) -> String {
        let mut out = String::new();
        out.push_str(&header_line());
        out.push('\n');

        let camera = &self.camera;
        out.push_str(&format!(
            "{} {} {} {}\n",
            camera.x, camera.y, camera.zoom, self.world_name
        ));

        let roads: Vec<String> = self
            .roads
            .iter()
            .map(|r| format!("{} {} {}", r.x, r.y, r.road_type))
            .collect();
        out.push_str(&roads.join(" "));
        out.push('\n');

        for b in &self.buildings {
            out.push_str(&format!(
                "{} {} {} {} {}",
                b.x,
                b.y,
                b.rotation.index(),
                b.building_type,
                b.shape
            ));
            for token in &b.tokens {
                out.push(' ');
                out.push_str(token);
            }
            out.push('\n');
        }
        out
    }

    // -----------------------------------------------------------------------
    // Decode
    // -----------------------------------------------------------------------

    /// Parses save text. Names are not checked against any catalog here;
    /// that happens in [`crate::restore_town`].
    pub fn decode(text: &str) -> Result<Self, SaveError> {
        let mut lines = text.lines();
        let version = parse_header(lines.next())?;

        let camera_line = lines.next().ok_or_else(|| parse_error(2, "missing camera line"))?;
        let (camera, world_name) = decode_camera(camera_line)?;

        let road_line = lines.next().ok_or_else(|| parse_error(3, "missing road line"))?;
        let roads = decode_roads(road_line)?;

        let mut buildings = Vec::new();
        for (i, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            buildings.push(decode_building(FIRST_BUILDING_LINE + i, line)?);
        }

        Ok(Self {
            version,
            world_name,
            camera,
            roads,
            buildings,
        })
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> SaveError {
    SaveError::Parse {
        line,
        message: message.into(),
    }
}

/// Parses the next whitespace-separated token as `T`.
fn field<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
    what: &str,
) -> Result<T, SaveError> {
    let token = tokens
        .next()
        .ok_or_else(|| parse_error(line, format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid {what} '{token}'")))
}

fn decode_camera(line: &str) -> Result<(CameraRecord, String), SaveError> {
    // The world name is everything after the third separator and may
    // contain spaces.
    let mut parts = line.splitn(4, ' ');
    let x = field(&mut parts, 2, "camera x")?;
    let y = field(&mut parts, 2, "camera y")?;
    let zoom = field(&mut parts, 2, "zoom")?;
    let name = parts.next().unwrap_or_default().trim_end_matches('\r');
    Ok((CameraRecord { x, y, zoom }, name.to_string()))
}

fn decode_roads(line: &str) -> Result<Vec<RoadRecord>, SaveError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() % 3 != 0 {
        return Err(parse_error(
            3,
            format!("expected x y type triples, found {} tokens", tokens.len()),
        ));
    }
    tokens
        .chunks(3)
        .map(|triple| {
            let mut it = triple.iter().copied();
            Ok(RoadRecord {
                x: field(&mut it, 3, "road x")?,
                y: field(&mut it, 3, "road y")?,
                road_type: field(&mut it, 3, "road type")?,
            })
        })
        .collect()
}

fn decode_building(line_no: usize, line: &str) -> Result<BuildingRecord, SaveError> {
    let mut tokens = line.split_whitespace();
    let x = field(&mut tokens, line_no, "building x")?;
    let y = field(&mut tokens, line_no, "building y")?;
    let angle: u8 = field(&mut tokens, line_no, "angle index")?;
    let rotation = Rotation::from_index(angle)
        .ok_or_else(|| parse_error(line_no, format!("angle index {angle} is not 0-3")))?;
    let building_type = field(&mut tokens, line_no, "building type")?;
    let shape = field(&mut tokens, line_no, "shape")?;
    Ok(BuildingRecord {
        line: line_no,
        x,
        y,
        rotation,
        building_type,
        shape,
        tokens: tokens.map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\n\
        -128 8192 1.25 Old Sarum\n\
        10 10 dirt 11 10 cobble\n\
        40 40 1 cottage lean oak thatch timber\n\
        44 40 0 well round stone\n";

    #[test]
    fn test_decode_sample() {
        let save = SaveData::decode(SAMPLE).expect("sample decodes");
        assert_eq!(save.version, 1);
        assert_eq!(save.world_name, "Old Sarum");
        assert_eq!(
            save.camera,
            CameraRecord {
                x: -128.0,
                y: 8192.0,
                zoom: 1.25
            }
        );
        assert_eq!(save.roads.len(), 2);
        assert_eq!(save.roads[1].road_type, "cobble");
        assert_eq!(save.buildings.len(), 2);
        let first = &save.buildings[0];
        assert_eq!(first.rotation, Rotation::Deg90);
        assert_eq!(first.shape, "lean");
        assert_eq!(first.tokens, vec!["oak", "thatch", "timber"]);
        assert_eq!(first.line, 4);
    }

    #[test]
    fn test_building_records_keep_their_source_line() {
        let text = "1\n0 0 1 Town\n\n5 5 0 well round stone\n\n\n9 9 0 well round stone\n";
        let save = SaveData::decode(text).unwrap();
        let lines: Vec<usize> = save.buildings.iter().map(|b| b.line).collect();
        assert_eq!(lines, vec![4, 7]);
    }

    #[test]
    fn test_encode_reproduces_canonical_text() {
        let save = SaveData::decode(SAMPLE).expect("sample decodes");
        assert_eq!(save.encode(), SAMPLE);
    }

    #[test]
    fn test_empty_town_encodes_an_empty_road_line() {
        let save = SaveData {
            version: SAVE_FORMAT_VERSION,
            world_name: "Empty".to_string(),
            camera: CameraRecord {
                x: 0.0,
                y: 0.0,
                zoom: 1.0,
            },
            roads: Vec::new(),
            buildings: Vec::new(),
        };
        let text = save.encode();
        assert_eq!(text, "1\n0 0 1 Empty\n\n");
        assert_eq!(SaveData::decode(&text), Ok(save));
    }

    #[test]
    fn test_incomplete_road_triple_is_a_parse_error() {
        let text = "1\n0 0 1 Town\n10 10 dirt 11 10\n";
        assert!(matches!(
            SaveData::decode(text),
            Err(SaveError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_bad_angle_index_reports_its_line() {
        let text = "1\n0 0 1 Town\n\n5 5 0 well round stone\n6 6 4 well round stone\n";
        let err = SaveData::decode(text).unwrap_err();
        assert!(
            matches!(&err, SaveError::Parse { line: 5, message } if message.contains("angle")),
            "got: {err:?}"
        );
    }

    #[test]
    fn test_missing_camera_line() {
        assert!(matches!(
            SaveData::decode("1\n"),
            Err(SaveError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_newer_version_is_refused_before_parsing_the_body() {
        assert!(matches!(
            SaveData::decode("2\ngarbage"),
            Err(SaveError::VersionMismatch { found: 2, .. })
        ));
    }
}
