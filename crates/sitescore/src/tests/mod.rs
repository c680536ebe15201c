//! Front-end tests: config and dataset files, rendering, log rotation

mod logging;

pub(crate) const PLANTS_JSON: &str = r#"[
  {"PSTATABB": "TX", "Plant county name": "Harris", "PNAME": "Alpha",
   "GEN": 5, "PIPE": 5, "MARKET": 4, "INCENTIVES": 1, "WATER": 5},
  {"PSTATABB": "TX", "Plant county name": "Harris", "PNAME": "Bravo",
   "GEN": 2, "PIPE": "4", "MARKET": 3, "INCENTIVES": 0, "WATER": 2},
  {"PSTATABB": "LA", "Plant county name": "Caddo", "PNAME": "Delta",
   "GEN": 1, "PIPE": 4, "MARKET": 1, "INCENTIVES": 0, "WATER": 1, "NOTES": null}
]"#;
