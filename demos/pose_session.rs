//! A complete posing session, end to end: select a joint, rotate it with
//! symmetry on, dress the scene with a prop, import a model, save the pose,
//! wreck everything and restore the rest state.
//!
//! Run with `RUST_LOG=debug cargo run --example pose_session` to watch the
//! engine narrate each mutation.

use marionette::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut editor = marionette::default();
    editor.set_symmetry(true);

    // Raise the left arm; the right arm follows, mirrored.
    editor.set_mode(EditMode::Rotate);
    editor.select_joint("l_shoulder");
    editor.apply_handle_rotation(Quaternion::from_angle_z(Rad(1.1)));

    // Thicken the left thigh; scale mode targets the visible part, so the
    // skeleton's spacing is untouched and the right thigh matches.
    editor.set_mode(EditMode::Scale);
    editor.select_joint("l_knee");
    editor.apply_handle_scale(Vector3::new(1.4, 1.0, 1.4));

    // Scene dressing.
    let ball = editor.add_prop(PropKind::Ball);
    println!(
        "added prop {:?} at {:?}",
        ball,
        editor.graph().get(ball).unwrap().local.position
    );

    // A model "import": here the collaborator is inline and resolves
    // immediately, but the registry stays untouched until poll_import.
    let (mut pending, sender) = editor.begin_import();
    sender
        .send(Ok(ModelPrototype {
            root: PrototypeNode::new("lamp")
                .with_child(PrototypeNode::new("shade"))
                .with_child(PrototypeNode::new("stand")),
        }))
        .ok();
    match editor.poll_import(&mut pending) {
        ImportStatus::Ready(root) => {
            // Picking any internal node promotes the selection to the root.
            let shade = editor.graph().children_of(root)[0];
            editor.set_mode(EditMode::Move);
            let selection = editor.select_hit(&PickHit::on_node(shade));
            println!("picked the shade, selected {:?}", selection);
        }
        ImportStatus::Failed(err) => println!("import failed, scene unchanged: {err}"),
        ImportStatus::Pending => unreachable!("collaborator already resolved"),
    }

    let doc = editor.save_pose("waving with a lamp");
    println!("{}", serde_json::to_string_pretty(&doc)?);

    // Scramble, then prove both recovery paths.
    editor.apply_preset("wave");
    editor.restore_rest();
    println!("rest pose restored; session over");

    Ok(())
}
