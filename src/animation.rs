// Build animation frames by moving parameters along polynomials in time
//
// Each frame is a copy of the base parameters with every modification applied
// at a time running from 0 on the first frame to 1 on the last.

use json::JsonValue;
use num::complex::Complex;

use crate::config::SolveConfig;
use crate::error::ConfigError;
use crate::polynomial;

pub const DEFAULT_FRAME_COUNT : usize = 60;

struct Modifications {
    mods : Vec<ModificationPoly>
}

impl Modifications {
    fn from_json(input : &JsonValue) -> Result<Modifications, ConfigError> {
        if !input.is_array() {
            return Err(ConfigError::MissingField("mods"));
        }
        let mods = input.members().map(
            ModificationPoly::from_json
        ).collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Modifications { mods })
    }
}

// Sets the parameter at the given path to the polynomial evaluated at the
// frame time, optionally rounded to an integer
struct ModificationPoly {
    param_path : Vec<String>,
    coefficients : Vec<f64>,
    to_int : bool
}

fn set_json_param(
    root : &mut JsonValue,
    path : &[String],
    val : JsonValue
) -> Result<(), ConfigError> {
    let name = &path[0];
    let target = if root.is_array() {
        let id = name.parse::<usize>().ok().filter(|id| *id < root.len()).ok_or_else(
            || ConfigError::InvalidField {
                field : "param",
                reason : format!("{} is not an index into the array", name)
            }
        )?;
        &mut root[id]
    } else {
        &mut root[name.as_str()]
    };
    if path.len() == 1 {
        *target = val;
        Ok(())
    } else {
        set_json_param(target, &path[1..], val)
    }
}

impl ModificationPoly {
    fn from_json(input : &JsonValue) -> Result<ModificationPoly, ConfigError> {
        let path_s = input["param"].as_str().ok_or(ConfigError::MissingField("param"))?;
        let param_path : Vec<String> = path_s.split('/').map(
            |s| s.to_string()
        ).collect();
        if param_path.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::InvalidField {
                field : "param",
                reason : format!("empty component in {}", path_s)
            });
        }
        if !input["coeff"].is_array() {
            return Err(ConfigError::MissingField("coeff"));
        }
        let coefficients = input["coeff"].members().map(
            |value| value.as_f64().ok_or_else(|| ConfigError::InvalidField {
                field : "coeff",
                reason : format!("{} is not a number", value)
            })
        ).collect::<Result<Vec<f64>, ConfigError>>()?;
        let to_int = input["integral"].as_bool().unwrap_or(false);
        Ok(ModificationPoly { param_path, coefficients, to_int })
    }

    fn modify(&self, input : &mut JsonValue, time : f64) -> Result<(), ConfigError> {
        set_json_param(input, &self.param_path, self.evaluate(time))
    }

    fn evaluate(&self, time : f64) -> JsonValue {
        let val = polynomial::evaluate(&self.coefficients, Complex::new(time, 0.0)).re;
        if self.to_int {
            JsonValue::from(val.round() as i64)
        } else {
            JsonValue::from(val)
        }
    }
}

// Input is {base, frames_count, mods}
pub fn make_frames(input : &JsonValue) -> Result<Vec<JsonValue>, ConfigError> {
    let base = &input["base"];
    if !base.is_object() {
        return Err(ConfigError::MissingField("base"));
    }
    let frame_count = input["frames_count"].as_usize().unwrap_or(DEFAULT_FRAME_COUNT);
    let mods = Modifications::from_json(&input["mods"])?;
    let per_frame = if frame_count > 1 {
        1.0 / (frame_count - 1) as f64
    } else {
        0.0
    };
    (0..frame_count).map(
        |i| -> Result<JsonValue, ConfigError> {
            let mut frame = base.clone();
            let time = i as f64 * per_frame;
            for modification in mods.mods.iter() {
                modification.modify(&mut frame, time)?;
            }
            Ok(frame)
        }
    ).collect()
}

pub fn frame_configs(input : &JsonValue) -> Result<Vec<SolveConfig>, ConfigError> {
    make_frames(input)?.iter().map(SolveConfig::from_json).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // x^3 + (1-t) x + t, sweeping from x^3 + x to x^3 + 1
    const CUBIC_SWEEP : &str = r#"{
        "base": {
            "polynomial": [0, 1, 0, 1],
            "roots": [[0, 1], [0, -1], 0],
            "grid_size": 4
        },
        "frames_count": 3,
        "mods": [
            {"param": "polynomial/0", "coeff": [0, 1]},
            {"param": "polynomial/1", "coeff": [1, -1]},
            {"param": "grid_size", "coeff": [4, 8], "integral": true}
        ]
    }"#;

    #[test]
    fn test_make_frames_interpolates() {
        let input = json::parse(CUBIC_SWEEP).unwrap();
        let frames = make_frames(&input).unwrap();
        assert_eq!(frames.len(), 3);
        let coefficients : Vec<Vec<f64>> = frames.iter().map(
            |frame| frame["polynomial"].members().filter_map(|v| v.as_f64()).collect()
        ).collect();
        assert_eq!(coefficients, vec![
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.5, 0.5, 0.0, 1.0],
            vec![1.0, 0.0, 0.0, 1.0]
        ]);
        let sizes : Vec<usize> = frames.iter().filter_map(|frame| frame["grid_size"].as_usize()).collect();
        assert_eq!(sizes, vec![4, 8, 12]);
        // Base is left alone
        assert_eq!(input["base"]["polynomial"][0].as_f64(), Some(0.0));
    }

    #[test]
    fn test_frame_configs_solve() {
        let input = json::parse(CUBIC_SWEEP).unwrap();
        let configs = frame_configs(&input).unwrap();
        assert_eq!(configs.len(), 3);
        // x^3 + x has roots 0 and +-i
        let fractal = configs[0].solver().unwrap().solve().unwrap();
        assert_eq!(fractal.root_indices.size(), 4);
        assert!(fractal.root_indices.iter().all(|&index| index < 3));
    }

    #[test]
    fn test_single_frame_uses_time_zero() {
        let input = json::parse(r#"{
            "base": {"bound": 1},
            "frames_count": 1,
            "mods": [{"param": "bound", "coeff": [1, 1]}]
        }"#).unwrap();
        let frames = make_frames(&input).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["bound"].as_f64(), Some(1.0));
    }

    #[test]
    fn test_bad_modifications() {
        let input = json::parse(r#"{"base": {}, "mods": [{"coeff": [1]}]}"#).unwrap();
        assert!(matches!(make_frames(&input), Err(ConfigError::MissingField("param"))));
        let input = json::parse(r#"{"base": {"polynomial": [1, 2]}, "mods": [{"param": "polynomial/x", "coeff": [1]}]}"#).unwrap();
        assert!(matches!(make_frames(&input), Err(ConfigError::InvalidField { field : "param", .. })));
        let input = json::parse(r#"{"base": {}}"#).unwrap();
        assert!(matches!(make_frames(&input), Err(ConfigError::MissingField("mods"))));
        let input = json::parse(r#"{"mods": []}"#).unwrap();
        assert!(matches!(make_frames(&input), Err(ConfigError::MissingField("base"))));
    }
}
