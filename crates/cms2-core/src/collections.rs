//! Small collection aliases: an `ahash`-hashed set used for one-off dedup
//! passes (completion filtering, outline dedup) where insertion order
//! doesn't matter.

use std::collections::HashSet;
use std::hash::BuildHasherDefault;

pub type NameSet<'a> = HashSet<&'a str, BuildHasherDefault<ahash::AHasher>>;
