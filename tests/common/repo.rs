//! Direct inspection of the persisted repository layout, used to verify
//! what the commands wrote without going through the binary again.

use flate2::read::ZlibDecoder;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use walkdir::WalkDir;

/// A commit record parsed straight from the object store
#[derive(Debug)]
pub struct CommitRecord {
    pub parents: Vec<String>,
    pub tree: BTreeMap<String, String>,
    pub message: String,
}

/// Branch name the HEAD symref points at
pub fn current_branch(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".lit").join("HEAD")).expect("Failed to read HEAD");

    head.trim()
        .strip_prefix("ref: refs/heads/")
        .expect("HEAD is not a symbolic reference")
        .to_string()
}

pub fn branch_oid(dir: &Path, name: &str) -> String {
    let ref_path = dir.join(".lit").join("refs").join("heads").join(name);

    std::fs::read_to_string(&ref_path)
        .unwrap_or_else(|e| panic!("Failed to read branch ref {name}: {e}"))
        .trim()
        .to_string()
}

pub fn head_oid(dir: &Path) -> String {
    branch_oid(dir, &current_branch(dir))
}

pub fn index_content(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".lit").join("index")).expect("Failed to read index")
}

pub fn read_commit(dir: &Path, oid: &str) -> CommitRecord {
    let raw = read_object(dir, oid);
    let header_end = raw
        .iter()
        .position(|byte| *byte == 0)
        .expect("Object has no header");
    let body = String::from_utf8(raw[header_end + 1..].to_vec()).expect("Commit is not UTF-8");

    let mut lines = body.lines();
    let mut parents = Vec::new();
    let mut tree = BTreeMap::new();

    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }

        if let Some(parent) = line.strip_prefix("parent ") {
            parents.push(parent.to_string());
        } else if let Some(rest) = line.strip_prefix("entry ") {
            let (digest, name) = rest.split_once(' ').expect("Malformed tree entry");
            tree.insert(name.to_string(), digest.to_string());
        }
        // timestamp line is irrelevant here
    }

    let message = lines.collect::<Vec<_>>().join("\n");

    CommitRecord {
        parents,
        tree,
        message,
    }
}

/// Total number of objects (blobs and commits) in the store
pub fn count_objects(dir: &Path) -> usize {
    WalkDir::new(dir.join(".lit").join("objects"))
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .count()
}

/// The digest `lit add` computes for the given file content
pub fn blob_digest(content: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn read_object(dir: &Path, oid: &str) -> Vec<u8> {
    let object_path = dir
        .join(".lit")
        .join("objects")
        .join(&oid[..2])
        .join(&oid[2..]);
    let compressed =
        std::fs::read(&object_path).unwrap_or_else(|e| panic!("Failed to read object {oid}: {e}"));

    let mut decoder = ZlibDecoder::new(&compressed[..]);
    let mut content = Vec::new();
    decoder
        .read_to_end(&mut content)
        .expect("Failed to decompress object");

    content
}
