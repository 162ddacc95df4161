use crate::database::PostRepository;
use crate::error::{AppError, AppResult};
use crate::models::{PostIdentifier, SUFFIX_SPACE};
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// 帖子编号生成器
///
/// 当前小时前缀 + 随机三位后缀，逐个检查是否已被占用，最多尝试 `max_attempts` 次。
/// 检查与插入之间没有加锁，两个并发请求可能拿到同一个编号；
/// 最终以 `posts.identifier` 唯一索引为准（插入时返回 Conflict）。
#[derive(Clone)]
pub struct IdentifierGenerator {
    posts: Arc<dyn PostRepository>,
    max_attempts: u32,
}

impl IdentifierGenerator {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

    pub fn new(posts: Arc<dyn PostRepository>, max_attempts: u32) -> Self {
        Self {
            posts,
            max_attempts: max_attempts.max(1),
        }
    }

    pub async fn generate(&self) -> AppResult<PostIdentifier> {
        let prefix = PostIdentifier::prefix_at(&Local::now());
        let mut rng = StdRng::from_entropy();
        self.generate_with(&prefix, &mut rng).await
    }

    pub async fn generate_with<R>(&self, prefix: &str, rng: &mut R) -> AppResult<PostIdentifier>
    where
        R: Rng + Send,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = PostIdentifier::from_prefix(prefix, rng.gen_range(0..SUFFIX_SPACE));
            if !self.posts.exists_post_with_identifier(&candidate).await? {
                return Ok(candidate);
            }
            log::debug!("Post identifier {candidate} already taken (attempt {attempt})");
        }

        log::warn!(
            "No free post identifier for prefix {prefix} after {} attempts",
            self.max_attempts
        );
        Err(AppError::IdentifierExhaustion {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use regex::Regex;
    use std::collections::HashSet;

    const PREFIX: &str = "2024_03_07_09_HEMUNG_";

    fn store_with_taken(suffixes: impl Iterator<Item = u16>) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.add_user(1, "kim", "01012345678");
        for s in suffixes {
            store.add_post(1, &format!("{PREFIX}{s:03}"));
        }
        store
    }

    #[tokio::test]
    async fn test_generated_identifier_format() {
        let store = Arc::new(MemoryStore::new());
        let generator = IdentifierGenerator::new(store, IdentifierGenerator::DEFAULT_MAX_ATTEMPTS);
        let id = generator.generate().await.unwrap();

        let pattern = Regex::new(r"^\d{4}_\d{2}_\d{2}_\d{2}_HEMUNG_\d{3}$").unwrap();
        assert!(pattern.is_match(id.as_str()), "unexpected format: {id}");
    }

    #[tokio::test]
    async fn test_never_returns_an_existing_identifier() {
        // 900 个后缀已被占用，只剩 100 个
        let store = store_with_taken(0..900);
        let existing: HashSet<String> = (0..900u16).map(|s| format!("{PREFIX}{s:03}")).collect();
        let generator = IdentifierGenerator::new(store.clone(), 10_000);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let id = generator.generate_with(PREFIX, &mut rng).await.unwrap();
            assert!(id.as_str().starts_with(PREFIX));
            assert!(!existing.contains(id.as_str()), "{id} was already taken");
            assert!(id.suffix().parse::<u16>().unwrap() >= 900);
        }
    }

    #[tokio::test]
    async fn test_other_hours_do_not_block_a_suffix() {
        let store = Arc::new(MemoryStore::new());
        store.add_user(1, "kim", "01012345678");
        for s in 0..SUFFIX_SPACE {
            store.add_post(1, &format!("2024_03_07_08_HEMUNG_{s:03}"));
        }
        let generator = IdentifierGenerator::new(store.clone(), 1);
        let mut rng = StdRng::seed_from_u64(7);
        let id = generator.generate_with(PREFIX, &mut rng).await.unwrap();
        assert!(id.as_str().starts_with(PREFIX));
        assert_eq!(store.exists_checks(), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_after_exactly_max_attempts() {
        let store = store_with_taken(0..SUFFIX_SPACE);
        let generator = IdentifierGenerator::new(store.clone(), 10_000);
        let mut rng = StdRng::seed_from_u64(42);

        let err = generator.generate_with(PREFIX, &mut rng).await.unwrap_err();
        assert!(matches!(err, AppError::IdentifierExhaustion { attempts: 10_000 }));
        assert_eq!(store.exists_checks(), 10_000);
    }

    #[tokio::test]
    async fn test_exhaustion_respects_configured_bound() {
        let store = store_with_taken(0..SUFFIX_SPACE);
        let generator = IdentifierGenerator::new(store.clone(), 3);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            generator.generate_with(PREFIX, &mut rng).await,
            Err(AppError::IdentifierExhaustion { attempts: 3 })
        ));
        assert_eq!(store.exists_checks(), 3);
    }

    #[tokio::test]
    async fn test_deleted_post_keeps_its_identifier() {
        use crate::database::PostRepository;

        let store = store_with_taken(0..SUFFIX_SPACE);
        let deleted = store
            .find_post_by_identifier(&PostIdentifier::parse(&format!("{PREFIX}500")).unwrap())
            .await
            .unwrap()
            .unwrap();
        store.soft_delete_post(deleted.id).await.unwrap();

        let generator = IdentifierGenerator::new(store.clone(), 50);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            generator.generate_with(PREFIX, &mut rng).await,
            Err(AppError::IdentifierExhaustion { .. })
        ));
    }
}
