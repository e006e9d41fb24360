//! Small catalog with predictable geometry for unit and integration tests.

use super::Catalogs;

/// Types, sorted: `house` (1x1 door facing north under a roof), `hut` (1x1
/// wall), `keep` (1x1 three-layer tower, group `forts`), `longhouse` (3x1),
/// `manor` (2x2, two shapes).
pub(crate) const TEST_CATALOG_JSON: &str = r#"{
  "groups": { "default": 5, "forts": 2 },
  "grounds": ["grass", "sand"],
  "roads": { "dirt": {}, "stone": { "straight": "stone_straight" } },
  "blocks": {
    "wall": {
      "brick":  { "north": "wb_n", "east": "wb_e", "south": "wb_s", "west": "wb_w" },
      "stone":  { "north": "ws_n", "east": "ws_e", "south": "ws_s", "west": "ws_w" },
      "timber": { "north": "wt_n", "east": "wt_e", "south": "wt_s", "west": "wt_w" }
    },
    "door": {
      "oak": { "north": "door_n", "east": "door_e", "south": "door_s", "west": "door_w", "frontage": ["north"] }
    },
    "roof": { "slate": {}, "thatch": {} },
    "tower": { "stone": {} }
  },
  "building_types": {
    "hut": { "shapes": { "single": [[["wall"]]] } },
    "house": { "shapes": { "front_door": [[["door", "roof"]]] } },
    "longhouse": {
      "shapes": {
        "long": [
          [["wall:brick;stone", "roof"]],
          [["wall!timber", "roof:thatch"]],
          [["door", "roof"]]
        ]
      }
    },
    "manor": {
      "shapes": {
        "square": [[["wall", "roof"], ["wall"]], [["wall"], ["wall", "roof"]]],
        "ell": [[["wall"], ["wall"]], [["wall"], [""]]]
      }
    },
    "keep": { "group": "forts", "shapes": { "tower": [[["tower", "tower", "tower"]]] } }
  }
}"#;

pub(crate) fn test_catalogs() -> Catalogs {
    match Catalogs::from_json(TEST_CATALOG_JSON) {
        Ok(catalogs) => catalogs,
        Err(e) => panic!("test catalog is invalid: {e}"),
    }
}
