use mesh_viewer::error::{GeometryError, ViewerError};
use mesh_viewer::io::geometry_parser::{load_mesh, parse};
use mesh_viewer::pipeline::buffers::MeshBuffers;
use std::io::Cursor;

const TWO_RECORDS_ONE_CORNER: &str = "\
v 0.5 0.5 0.5
v 1.0 2.0 3.0
vn 0 1 0
vn 1 0 0
f 2/1/2 2//2 2/7/2
";

#[test]
fn face_reusing_one_pair_gives_one_vertex() {
    let mesh = parse(Cursor::new(TWO_RECORDS_ONE_CORNER)).unwrap();
    assert_eq!(mesh.vertices.len(), 1);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.indices, vec![0, 0, 0]);
}

#[test]
fn reparsing_is_deterministic() {
    let source = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/cube.obj"))
        .unwrap();
    let a = parse(Cursor::new(source.as_str())).unwrap();
    let b = parse(Cursor::new(source.as_str())).unwrap();
    assert_eq!(a.vertices, b.vertices);
    assert_eq!(a.indices, b.indices);
}

#[test]
fn bundled_cube_loads_with_shared_face_corners() {
    let mesh = load_mesh(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/cube.obj")).unwrap();

    // 6 quads -> 12 triangles; each face has its own normal, so 4 corners per face.
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.vertices.len(), 24);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    assert!(mesh.edge_indices.is_empty());

    let buffers = MeshBuffers::upload(&mesh);
    assert_eq!(buffers.vertex_count(), 24);
    for (i, vertex) in mesh.vertices.iter().enumerate() {
        assert_eq!(buffers.fetch(i as u32), *vertex);
    }
}

#[test]
fn unique_vertices_are_pairwise_distinct() {
    let mesh = load_mesh(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/cube.obj")).unwrap();
    for (i, a) in mesh.vertices.iter().enumerate() {
        for b in &mesh.vertices[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn missing_file_is_an_io_error_with_path() {
    let err = load_mesh("does/not/exist.obj").unwrap_err();
    match err {
        ViewerError::Io { path, .. } => assert!(path.ends_with("exist.obj")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_geometry_converts_into_viewer_error() {
    let err: ViewerError = parse(Cursor::new("v 0 0 0\nvn 0 0 1\nf 1//1 1//1 9//1\n"))
        .unwrap_err()
        .into();
    assert!(matches!(
        err,
        ViewerError::MalformedGeometry(GeometryError::IndexOutOfRange { line: 3, .. })
    ));
    assert!(err.to_string().contains("line 3"));
}
