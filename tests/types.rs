use meshfold::{Aabb, Mesh, Scene};

/// Ensure that the pipeline can run with either float width
#[test]
fn float_widths() {
    let mut single = Mesh::<f32>::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![0, 1, 2]);
    single.init();
    let mut double = Mesh::<f64>::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![0, 1, 2]);
    double.init();
    let _ = Scene::<f32>::new("f32");
    let _ = Scene::<f64>::new("f64");
    let _ = Aabb::<f32>::empty() | Aabb::<f32>::empty();
    let _ = Aabb::<f64>::empty() | Aabb::<f64>::empty();
}

/// Meshes must be shareable across threads so that scenes can be initialized in parallel
#[test]
fn send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Mesh<f32>>();
    assert_send_sync::<Mesh<f64>>();
    assert_send_sync::<Scene<f32>>();
}
