use crate::ast::BlockId;
use crc32fast::Hasher;

/// Generate a session seed from an editing session name using CRC32
pub fn get_session_seed(name: &str) -> String {
    let mut buff = String::from(name);
    if !name.starts_with("session://") {
        buff = format!("session://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential block id generator for one editing session.
///
/// The counter only moves forward, so an id is never handed out twice even
/// after the block carrying it has been deleted.
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String,
    count: u64,
}

impl IDGenerator {
    pub fn new(session: &str) -> Self {
        Self {
            seed: get_session_seed(session),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> BlockId {
        self.count += 1;
        BlockId::new(format!("{}-{}", self.seed, self.count))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_seed_generation() {
        let id1 = get_session_seed("draft");
        let id2 = get_session_seed("draft");
        assert_eq!(id1, id2);

        let id3 = get_session_seed("other");
        assert_ne!(id1, id3);

        assert_eq!(get_session_seed("session://draft"), id1);
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IDGenerator::new("draft");

        let id1 = gen.new_id();
        let id2 = gen.new_id();
        let id3 = gen.new_id();

        assert!(id1.as_str().ends_with("-1"));
        assert!(id2.as_str().ends_with("-2"));
        assert!(id3.as_str().ends_with("-3"));
        assert_eq!(gen.issued(), 3);

        let seed = gen.seed();
        assert!(id1.as_str().starts_with(seed));
        assert!(id3.as_str().starts_with(seed));
    }
}
