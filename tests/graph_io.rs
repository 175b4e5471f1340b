use std::path::PathBuf;

use halo_color::{
    color_graph,
    graph::{generate, read_egr, read_snap, write_egr, write_snap},
    ColoringConfig, GraphError,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("halo-color-{}-{name}", std::process::id()))
}

#[test]
fn egr_files_round_trip() {
    let g = generate::random(300, 1200, 17).unwrap();
    let path = temp_path("round-trip.egr");
    write_egr(&g, &path).unwrap();
    let back = read_egr(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(back, g);
}

#[test]
fn snap_converts_to_egr_and_colors() {
    let g = generate::random(200, 700, 3).unwrap();
    let snap = temp_path("convert.txt");
    let egr = temp_path("convert.egr");
    write_snap(&g, std::fs::File::create(&snap).unwrap()).unwrap();
    write_egr(&read_snap(&snap).unwrap(), &egr).unwrap();
    let loaded = read_egr(&egr).unwrap();
    std::fs::remove_file(&snap).ok();
    std::fs::remove_file(&egr).ok();

    assert_eq!(loaded, g);
    let coloring = color_graph(&loaded, &ColoringConfig::with_threads(2)).unwrap();
    assert!(coloring.verify(&loaded).is_ok());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = read_egr(temp_path("does-not-exist.egr")).unwrap_err();
    assert!(matches!(err, GraphError::Io(_)));
}
