use crc32fast::Hasher;

/// Derive an id seed from a document name or path using CRC32
pub fn get_document_seed(name: &str) -> String {
    let mut buff = String::from(name);
    if !name.starts_with("layout://") {
        buff = format!("layout://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for section nodes within one layout
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: get_document_seed(name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Mint the next id. Ids are never handed out twice.
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Record an id that already exists in a loaded tree.
    ///
    /// If it was minted from this seed, the counter skips past it.
    pub fn observe(&mut self, id: &str) {
        let Some(suffix) = id
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
        else {
            return;
        };

        if let Ok(n) = suffix.parse::<u64>() {
            self.count = self.count.max(n);
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
