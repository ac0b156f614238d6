use crate::common::reader::split_keyword;

/// A `newmtl` declaration and every property line up to the next declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialDefinition {
    pub name: String,
    pub properties: Vec<String>,
}

impl MaterialDefinition {
    /// The raw property text, without the trailing blank lines that merely separate declarations.
    pub fn body(&self) -> String {
        let end = self
            .properties
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |last| last + 1);
        self.properties[..end].join("\n")
    }
}

#[derive(Debug, Clone, Default)]
pub struct MtlAsset {
    /// Anything before the first `newmtl` (usually nothing but blank lines).
    pub preamble: Vec<String>,
    pub materials: Vec<MaterialDefinition>,
}

impl MtlAsset {
    pub fn get(&self, name: &str) -> Option<&MaterialDefinition> {
        self.materials.iter().find(|material| material.name == name)
    }
}

/// `map_Kd`, `map_Bump`, ...: properties whose first argument is a texture file path.
pub fn is_texture_property(line: &str) -> bool {
    split_keyword(line).0.starts_with("map_")
}

/// Minimum and maximum argument count of a texture option. Arguments past the minimum are only
/// taken while they are numeric. Unknown options take any run of numbers.
fn option_arity(option: &str) -> (usize, usize) {
    match option {
        "-blendu" | "-blendv" | "-cc" | "-clamp" | "-imfchan" | "-type" => (1, 1),
        "-bm" | "-boost" | "-texres" => (1, 1),
        "-mm" => (1, 2),
        "-o" | "-s" | "-t" => (1, 3),
        _ => (0, usize::MAX),
    }
}

/// Index of the texture path within the arguments of a `map_*` line, skipping leading options
/// such as `-bm 0.5` or `-o 1 1 0`. The last argument is always left over for the path.
fn texture_path_index(arguments: &[&str]) -> usize {
    let mut index = 0;
    while index + 1 < arguments.len() && arguments[index].starts_with('-') {
        let (minimum, maximum) = option_arity(arguments[index]);
        index += 1;

        let mut taken = 0;
        while taken < maximum
            && index + 1 < arguments.len()
            && (taken < minimum || arguments[index].parse::<f64>().is_ok())
        {
            index += 1;
            taken += 1;
        }
    }
    index
}

/// Replaces the texture path of a `map_*` line, keeping the keyword, its options and any trailing
/// tokens. Other lines are returned untouched.
pub fn rewrite_texture_path(line: &str, rewrite: impl FnOnce(&str) -> String) -> String {
    if !is_texture_property(line) {
        return line.to_string();
    }

    let (keyword, rest) = split_keyword(line);
    let mut arguments = rest.split_whitespace().collect::<Vec<_>>();
    if arguments.is_empty() {
        return line.to_string();
    }

    let index = texture_path_index(&arguments);
    let path = rewrite(arguments[index]);
    arguments[index] = &path;
    format!("{} {}", keyword, arguments.join(" "))
}
