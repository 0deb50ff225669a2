use anyhow::Result;
use optics2d::io::{read_scene, results_to_string, scene_from_str, write_results};
use optics2d::{SceneError, simulate, simulate_sweep};

const ON_AXIS: &str = r#"{
    "metadata": {
        "createdAt": "2024-03-14T09:26:53Z",
        "gridSize": 20,
        "angleOfIncidence": 0,
        "raysPerSource": 1,
        "maxBounces": 0,
        "sweep": { "start": 0, "stop": 0, "points": 1 }
    },
    "components": [
        { "id": "laser", "type": "source", "x": 0, "y": 0, "angle": 0, "properties": {} },
        { "id": "eye", "type": "detector", "x": 100, "y": 0, "angle": 0,
          "properties": { "radius": 30 } }
    ]
}"#;

#[test]
fn test_on_axis_scene_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("on_axis.json");
    std::fs::write(&path, ON_AXIS)?;

    let scene = read_scene(&path)?;
    let results = simulate_sweep(&scene)?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ray_segments.len(), 1);
    assert!((results[0].reading("eye").unwrap() - 1.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_results_wire_format() -> Result<()> {
    let scene = scene_from_str(ON_AXIS)?;
    let results = vec![simulate(&scene)?];

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.json");
    write_results(&path, &results)?;

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let sample = &value[0];
    assert_eq!(sample["sweepValue"], 0.0);
    assert_eq!(sample["raySegments"][0]["start"], serde_json::json!([0.0, 0.0]));
    assert_eq!(sample["raySegments"][0]["intensity"], 1.0);
    assert_eq!(sample["detectors"]["eye"], 1.0);
    assert_eq!(sample["droppedRays"], 0);

    assert!(results_to_string(&results)?.contains("\"raySegments\""));
    Ok(())
}

#[test]
fn test_unknown_component_type_rejected() {
    let text = ON_AXIS.replace("\"detector\"", "\"beamsplitter\"");
    let err = scene_from_str(&text).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SceneError>(),
        Some(&SceneError::UnknownComponentType("beamsplitter".to_string()))
    );
}

#[test]
fn test_sweep_scene_file() -> Result<()> {
    let text = ON_AXIS.replace(
        r#""sweep": { "start": 0, "stop": 0, "points": 1 }"#,
        r#""sweep": { "start": 0, "stop": 90, "points": 3 }"#,
    );
    let scene = scene_from_str(&text)?;
    let results = simulate_sweep(&scene)?;
    let values: Vec<f64> = results.iter().map(|r| r.sweep_value).collect();
    assert_eq!(values, vec![0.0, 45.0, 90.0]);

    // Only the on-axis sample reaches the detector
    assert!((results[0].reading("eye").unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(results[1].reading("eye"), Some(0.0));
    assert_eq!(results[2].reading("eye"), Some(0.0));
    Ok(())
}
