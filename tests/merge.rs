mod common;

use std::fs;

use common::{RED, read_obj, triangle, write};
use objmerge::error::MergeError;
use objmerge::merging::material_resolver::MaterialIdentity;
use objmerge::pipeline::merge_meshes;
use objmerge_files::ParserError;
use objmerge_files::common::types::Vector3;

#[test_log::test]
fn differently_named_identical_materials_share_one_group() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("in");
    let output = dir.path().join("out");

    write(&input.join("a.mtl"), &format!("newmtl matA\n{RED}\n"));
    write(&input.join("b.mtl"), &format!("# Blender\nnewmtl matB\n{}\n", RED.replace('\\', "/")));
    let a = write(&input.join("a.obj"), &triangle("a.mtl", "matA"));
    let b = write(
        &input.join("b.obj"),
        "mtllib b.mtl\nv 5 5 5\nv 6 5 5\nv 5 6 5\nusemtl matB\nf 1 2 3\n",
    );

    let report = merge_meshes(&output, &[a, b])?;
    let identity = MaterialIdentity::of_block(RED);
    assert_eq!(report.groups_written, vec![identity.clone()]);
    assert_eq!(report.materials, 1);

    let merged = read_obj(&output.join(format!("{identity}.obj")));
    assert_eq!(merged.material_library()?, format!("{identity}.mtl"));
    assert_eq!(merged.sections.len(), 1);
    assert_eq!(merged.sections[0].material, identity.as_str());
    assert_eq!(merged.positions.len(), 6);
    assert_eq!(merged.positions[3], Vector3::new(5.0, 5.0, 5.0));
    assert_eq!(merged.uvs.len(), 3);
    assert_eq!(merged.normals.len(), 1);

    let faces = merged.sections[0].faces.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(faces, vec!["f 1/1/1 2/2/1 3/3/1", "f 4 5 6"]);

    let library = fs::read_to_string(output.join(format!("{identity}.mtl")))?;
    assert_eq!(library, format!("newmtl {identity}\n{RED}\n"));
    Ok(())
}

#[test_log::test]
fn single_file_round_trip() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    write(&dir.path().join("m.mtl"), "newmtl only\nKd 0 1 0\n");
    let mesh = write(&dir.path().join("m.obj"), &triangle("m.mtl", "only"));

    let output = dir.path().join("out");
    let report = merge_meshes(&output, std::slice::from_ref(&mesh))?;
    assert_eq!(report.groups_written.len(), 1);

    let source = read_obj(&mesh);
    let merged = read_obj(&output.join(format!("{}.obj", report.groups_written[0])));
    assert_eq!(merged.positions, source.positions);
    assert_eq!(merged.uvs, source.uvs);
    assert_eq!(merged.normals, source.normals);
    assert_eq!(merged.sections[0].faces, source.sections[0].faces);
    Ok(())
}

#[test_log::test]
fn sections_are_split_by_material() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    write(&dir.path().join("m.mtl"), "newmtl red\nKd 1 0 0\nnewmtl blue\nKd 0 0 1\n");
    let mesh = write(
        &dir.path().join("m.obj"),
        "mtllib m.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nusemtl red\nf 1 2 3\nusemtl blue\nf 2 4 3\nusemtl red\nf 3 2 1\n",
    );

    let output = dir.path().join("out");
    let report = merge_meshes(&output, &[mesh])?;
    assert_eq!(report.groups_written.len(), 2);

    let red = read_obj(&output.join(format!("{}.obj", MaterialIdentity::of_block("Kd 1 0 0"))));
    assert_eq!(red.positions.len(), 3);
    assert_eq!(red.sections[0].faces.len(), 2);
    assert_eq!(red.sections[0].faces[1].to_string(), "f 3 2 1");

    let blue = read_obj(&output.join(format!("{}.obj", MaterialIdentity::of_block("Kd 0 0 1"))));
    assert_eq!(blue.positions, vec![
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ]);
    assert_eq!(blue.sections[0].faces[0].to_string(), "f 1 2 3");
    Ok(())
}

#[test_log::test]
fn undeclared_material_is_fatal() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    write(&dir.path().join("a.mtl"), "newmtl declared\nKd 1 1 1\n");
    // declared in another library, which must not be consulted
    write(&dir.path().join("b.mtl"), "newmtl elsewhere\nKd 1 1 1\n");
    let mesh = write(&dir.path().join("a.obj"), &triangle("a.mtl", "elsewhere"));

    let result = merge_meshes(&dir.path().join("out"), &[mesh]);
    assert!(matches!(result, Err(MergeError::UndeclaredMaterial { ref name, .. }) if name == "elsewhere"));
    Ok(())
}

#[test_log::test]
fn missing_mtllib_is_fatal() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let mesh = write(&dir.path().join("a.obj"), "v 0 0 0\nusemtl x\nf 1 1 1\n");

    let result = merge_meshes(&dir.path().join("out"), &[mesh]);
    assert!(matches!(
        result,
        Err(MergeError::Format(ParserError::MissingToken { prefix: "mtllib", .. }))
    ));
    Ok(())
}

#[test_log::test]
fn missing_library_is_skipped() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    write(&dir.path().join("ok.mtl"), "newmtl m\nKd 1 1 1\n");
    let ok = write(&dir.path().join("ok.obj"), &triangle("ok.mtl", "m"));
    let orphan = write(&dir.path().join("orphan.obj"), &triangle("gone.mtl", "m"));

    let report = merge_meshes(&dir.path().join("out"), &[orphan, ok])?;
    assert_eq!(report.meshes_skipped, 1);
    assert_eq!(report.groups_written.len(), 1);
    Ok(())
}

#[test_log::test]
fn face_outside_the_vertex_list_is_fatal() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    write(&dir.path().join("a.mtl"), "newmtl m\n");
    let mesh = write(&dir.path().join("a.obj"), "mtllib a.mtl\nv 0 0 0\nusemtl m\nf 1 2 3\n");

    let result = merge_meshes(&dir.path().join("out"), &[mesh]);
    assert!(matches!(
        result,
        Err(MergeError::Format(ParserError::IndexOutOfRange { kind: "position", .. }))
    ));
    Ok(())
}

#[test_log::test]
fn vertex_colours_survive_merging() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    write(&dir.path().join("c.mtl"), "newmtl paint\nKd 1 1 1\n");
    let mesh = write(
        &dir.path().join("c.obj"),
        "mtllib c.mtl\nv 0 0 0 1 0 0\nv 1 0 0 0 1 0\nv 0 1 0 0 0 1\nusemtl paint\nf 1 2 3\n",
    );

    let output = dir.path().join("out");
    let report = merge_meshes(&output, &[mesh])?;
    let text = fs::read_to_string(output.join(format!("{}.obj", report.groups_written[0])))?;
    assert!(text.contains("v 0 0 0 1 0 0\n"));
    assert!(text.contains("v 1 0 0 0 1 0\n"));
    assert!(text.contains("v 0 1 0 0 0 1\n"));
    Ok(())
}
