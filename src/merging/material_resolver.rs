use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::{Display, Formatter};
use std::path::Path;

use log::{trace, warn};
use objmerge_files::ParserError;
use objmerge_files::mtl::reader::MtlReader;
use objmerge_files::mtl::types::MtlAsset;
use sha2::{Digest, Sha256};

/// Content-derived material key: the SHA-256 of the normalised property text, hex encoded.
/// Independent of the declared name, the declaring file and the declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialIdentity(String);

impl MaterialIdentity {
    pub fn of_block(body: &str) -> MaterialIdentity {
        let digest = Sha256::digest(normalize_block(body).as_bytes());
        MaterialIdentity(format!("{:x}", digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MaterialIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Material blocks may embed texture paths in either separator convention.
pub fn normalize_block(body: &str) -> String {
    body.replace('\\', "/")
}

/// Every material block seen during a run, keyed by identity. Owned by the run and threaded
/// through explicitly. The first block inserted for an identity wins, later ones are redundant.
#[derive(Debug, Default)]
pub struct MaterialTable {
    blocks: HashMap<MaterialIdentity, String>,
}

impl MaterialTable {
    /// Returns whether the block was new.
    pub fn insert(&mut self, identity: MaterialIdentity, body: String) -> bool {
        match self.blocks.entry(identity) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(body);
                true
            }
        }
    }

    pub fn get(&self, identity: &MaterialIdentity) -> Option<&str> {
        self.blocks.get(identity).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// For one mesh file: which of its local material names carry a given identity. Usually one,
/// but a file may declare the same content twice under different names.
#[derive(Debug, Clone, Default)]
pub struct LocalNameMap {
    by_identity: BTreeMap<MaterialIdentity, BTreeSet<String>>,
}

impl LocalNameMap {
    pub fn from_resolved(resolved: &HashMap<String, MaterialIdentity>) -> LocalNameMap {
        let mut map = LocalNameMap::default();
        for (name, identity) in resolved {
            map.by_identity
                .entry(identity.clone())
                .or_default()
                .insert(name.clone());
        }
        map
    }

    pub fn local_names(&self, identity: &MaterialIdentity) -> Option<&BTreeSet<String>> {
        self.by_identity.get(identity)
    }
}

pub enum MaterialResolver {}

impl MaterialResolver {
    /// Maps every material declared in `asset` to its identity, registering unseen blocks in
    /// `table`. The mapping is local to this one library.
    pub fn resolve(asset: &MtlAsset, table: &mut MaterialTable) -> HashMap<String, MaterialIdentity> {
        let mut resolved = HashMap::with_capacity(asset.materials.len());

        for material in &asset.materials {
            let body = material.body();
            let identity = MaterialIdentity::of_block(&body);

            if resolved.contains_key(&material.name) {
                warn!(
                    "Material {} is declared more than once, keeping the first declaration",
                    material.name
                );
                continue;
            }

            if table.insert(identity.clone(), body) {
                trace!("New material {} (declared as {})", identity, material.name);
            }
            resolved.insert(material.name.clone(), identity);
        }

        resolved
    }

    pub fn resolve_file(path: &Path, table: &mut MaterialTable) -> Result<HashMap<String, MaterialIdentity>, ParserError> {
        let asset = MtlReader::parse_file(path)?;
        Ok(Self::resolve(&asset, table))
    }
}
