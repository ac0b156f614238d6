use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::ParserError;
use crate::obj::types::ObjMesh;

pub struct ObjWriter {}

impl ObjWriter {
    /// Writes a single-material mesh: library reference, positions, uvs and normals (both only when
    /// present), one `usemtl` and the faces.
    pub fn write_mesh<W: Write>(
        w: &mut W,
        material_library: &str,
        material_name: &str,
        mesh: &ObjMesh,
    ) -> Result<(), ParserError> {
        writeln!(w, "mtllib {}", material_library)?;

        writeln!(w, "# vertices")?;
        for position in &mesh.positions {
            writeln!(w, "v {}", position)?;
        }

        if !mesh.uvs.is_empty() {
            writeln!(w, "# uvs")?;
            for uv in &mesh.uvs {
                writeln!(w, "vt {}", uv)?;
            }
        }

        if !mesh.normals.is_empty() {
            writeln!(w, "# normals")?;
            for normal in &mesh.normals {
                writeln!(w, "vn {}", normal)?;
            }
        }

        writeln!(w, "usemtl {}", material_name)?;
        writeln!(w, "# faces")?;
        for face in &mesh.faces {
            writeln!(w, "{}", face)?;
        }

        Ok(())
    }

    /// Creates or truncates `path`.
    pub fn write_mesh_file(
        path: &Path,
        material_library: &str,
        material_name: &str,
        mesh: &ObjMesh,
    ) -> Result<(), ParserError> {
        let mut w = BufWriter::new(File::create(path)?);
        Self::write_mesh(&mut w, material_library, material_name, mesh)?;
        w.flush()?;
        Ok(())
    }
}
