#[cfg(test)]
mod tests {
    use crate::error::LinksError;
    use crate::repository::{FileLinkRepository, InMemoryLinkRepository, LinkRepository};
    use crate::repository_factory::create_repository;
    use newtab_common::{session::session_key, LinkItem};
    use newtab_config::AppConfig;

    fn sample() -> Vec<LinkItem> {
        vec![
            LinkItem::new("1", "Google", "https://www.google.com"),
            LinkItem {
                clicks: 3,
                ..LinkItem::new("2", "GitHub", "https://github.com")
            },
        ]
    }

    #[tokio::test]
    async fn test_in_memory_round_trip_and_isolation() {
        let repo = InMemoryLinkRepository::new();
        let a = session_key("rt-a");
        let b = session_key("rt-b");

        assert_eq!(repo.load(&a).await.unwrap(), None);
        repo.save(&a, sample()).await.unwrap();

        assert_eq!(repo.load(&a).await.unwrap(), Some(sample()));
        assert_eq!(repo.load(&b).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_in_memory_save_replaces_list() {
        let repo = InMemoryLinkRepository::new();
        let key = session_key("rt");
        repo.save(&key, sample()).await.unwrap();
        repo.save(&key, Vec::new()).await.unwrap();

        assert_eq!(repo.load(&key).await.unwrap(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_file_repository_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let key = session_key("rt-file");

        FileLinkRepository::new(dir.path().join("links"))
            .save(&key, sample())
            .await
            .unwrap();
        let reopened = FileLinkRepository::new(dir.path().join("links"));

        assert_eq!(reopened.load(&key).await.unwrap(), Some(sample()));
    }

    #[tokio::test]
    async fn test_file_repository_never_writes_raw_token() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLinkRepository::new(dir.path());
        repo.save(&session_key("super-secret-token"), sample()).await.unwrap();

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names.len(), 1);
        assert!(!names[0].contains("super-secret-token"));
        assert!(names[0].ends_with(".json"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_file_repository_overlapping_saves_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLinkRepository::new(dir.path());
        let key = session_key("rt");

        for round in 0..10 {
            let handles: Vec<_> = (0..16)
                .map(|n| {
                    let repo = repo.clone();
                    let key = key.clone();
                    let links = vec![LinkItem::new(
                        format!("{}-{}", round, n),
                        "Site",
                        "https://example.com",
                    )];
                    tokio::spawn(async move { repo.save(&key, links).await })
                })
                .collect();
            for handle in handles {
                handle.await.unwrap().unwrap();
            }

            let stored = repo.load(&key).await.unwrap().unwrap();
            assert_eq!(stored.len(), 1);
            assert!(stored[0].id.starts_with(&format!("{}-", round)));
        }

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec![format!("{}.json", key)]);
    }

    #[tokio::test]
    async fn test_file_repository_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLinkRepository::new(dir.path());

        let err = repo.load("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, LinksError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_file_repository_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let key = session_key("rt");
        tokio::fs::write(dir.path().join(format!("{}.json", key)), b"not json")
            .await
            .unwrap();

        let err = FileLinkRepository::new(dir.path()).load(&key).await.unwrap_err();
        assert!(matches!(err, LinksError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_factory_follows_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.links.storage_dir = Some(dir.path().to_string_lossy().into_owned());

        let repo = create_repository(&config);
        let key = session_key("rt");
        repo.save(&key, sample()).await.unwrap();

        assert!(dir.path().join(format!("{}.json", key)).exists());
    }
}
