//! End-to-end session pipeline tests: parameters in, metrics and viewer
//! bundle out.

use anyhow::Result;
use shoebox3d::session::Session;
use shoebox3d::{GeometryConstructionError, GeometryParams};

fn params(width: f64, floors: usize, wwr: f64) -> GeometryParams {
    GeometryParams {
        width,
        length: 10.0,
        floor_count: floors,
        floor_height: 3.0,
        wwr,
    }
}

#[test]
fn test_full_pipeline() -> Result<()> {
    let mut session = Session::new()?;
    session.set_parameters(&params(10., 2, 0.4));
    session.rebuild()?;

    let solids = session.floor_solids.as_ref().unwrap();
    assert_eq!(solids.len(), 2);

    let metrics = session.metrics().unwrap();
    assert!((metrics.volume - 600.).abs() < 1e-6);
    assert!((metrics.floor_area - 200.).abs() < 1e-9);
    // 8 exterior walls of 30 m2 each at 40% glazing
    assert!((metrics.glazing_area_rounded() - 96.).abs() < 1e-12);
    assert!(metrics.exterior_aperture_area > 0.);

    let bytes = session.set_visualize(true)?.unwrap();
    // 80-byte header, u32 count, then fixed-size facet records
    assert!(bytes.len() > 84);
    assert_eq!((bytes.len() - 84) % 50, 0);
    assert!(bytes.starts_with(b"binary STL - shoe_box"));

    let export = session.export_path.as_ref().unwrap();
    assert_eq!(export.extension().unwrap(), "b3m");
    assert!(export.is_file());
    Ok(())
}

#[test]
fn test_zero_floors_yields_empty_metrics() -> Result<()> {
    let mut session = Session::new()?;
    session.set_parameters(&params(10., 0, 0.4));
    session.rebuild()?;

    assert!(session.model.as_ref().unwrap().rooms().is_empty());
    let metrics = session.metrics().unwrap();
    assert_eq!(metrics.volume, 0.);
    assert_eq!(metrics.floor_area, 0.);
    assert_eq!(metrics.exterior_aperture_area, 0.);
    Ok(())
}

#[test]
fn test_resubmitted_failing_parameters_keep_failing() -> Result<()> {
    let mut session = Session::new()?;
    session.set_parameters(&params(10., 2, 0.4));
    session.rebuild()?;

    session.set_parameters(&params(0., 2, 0.4));
    assert!(session.rebuild().is_err());

    // The same failing parameters again: still an error, not a silent
    // success backed by the width-10 model
    session.set_parameters(&params(0., 2, 0.4));
    let err = session.rebuild().unwrap_err();
    assert!(err.downcast_ref::<GeometryConstructionError>().is_some());
    Ok(())
}

#[test]
fn test_degenerate_footprint_fails_at_rebuild() -> Result<()> {
    let mut session = Session::new()?;
    session.set_parameters(&params(0., 1, 0.4));
    let err = session.rebuild().unwrap_err();
    assert!(err.downcast_ref::<GeometryConstructionError>().is_some());
    Ok(())
}
