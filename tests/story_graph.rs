//! End-to-end checks through the public API: controller, registry and an
//! on-disk database.

use std::sync::Arc;
use std::thread;
use storyhoard::{
    Chapter, Choice, Controller, Database, EntityId, EntityType, Error, Media, MediaRole,
    Registry, Story,
};

fn controller_on(db: Database, owner: &str) -> Controller {
    Controller::new(Arc::new(Registry::new(db)), owner)
}

#[test]
fn test_graph_completeness_without_leakage() {
    let ctl = controller_on(Database::open_in_memory().unwrap(), "device-A");
    const CHAPTERS: usize = 4;
    const CHOICES: usize = 3;
    const MEDIA: usize = 2;

    let mut stories = Vec::new();
    for title in ["Left", "Right"] {
        let story = Story::new(title, "device-A");
        ctl.add(story.clone(), EntityType::CreatedStory).unwrap();

        let chapters: Vec<Chapter> = (0..CHAPTERS)
            .map(|i| Chapter::new(story.id.clone(), format!("{} chapter {}", title, i)))
            .collect();
        for chapter in &chapters {
            ctl.add(chapter.clone(), EntityType::Chapter).unwrap();
        }
        for (i, chapter) in chapters.iter().enumerate() {
            for c in 0..CHOICES {
                let target = &chapters[(i + c + 1) % CHAPTERS];
                let choice = Choice::new(chapter.id.clone(), target.id.clone(), format!("go {}", c));
                ctl.add(choice, EntityType::Choice).unwrap();
            }
            for m in 0..MEDIA {
                let role = if m % 2 == 0 { MediaRole::Illustration } else { MediaRole::Photo };
                let media = Media::new(chapter.id.clone(), format!("/{}/{}/{}.png", title, i, m), role);
                ctl.add(media, EntityType::Media).unwrap();
            }
        }
        stories.push(story);
    }

    for story in &stories {
        let assembled = ctl.complete_story(&story.id).unwrap();
        assert_eq!(assembled.chapters.len(), CHAPTERS);
        for chapter in assembled.chapters.values() {
            assert_eq!(chapter.story_id, story.id);
            assert!(chapter.text.starts_with(&story.title));
            assert_eq!(chapter.choices.len(), CHOICES);
            assert_eq!(chapter.illustrations.len() + chapter.photos.len(), MEDIA);
            for choice in &chapter.choices {
                assert_eq!(choice.chapter_from, chapter.id);
                assert!(assembled.follow(choice).is_some());
            }
            for media in chapter.media() {
                assert_eq!(media.chapter_id, chapter.id);
            }
        }
        assert!(assembled.dangling_choices().is_empty());
    }

    let stats = ctl.stats().unwrap();
    assert_eq!(stats.stories, 2);
    assert_eq!(stats.chapters, 2 * CHAPTERS);
    assert_eq!(stats.choices, 2 * CHAPTERS * CHOICES);
    assert_eq!(stats.media, 2 * CHAPTERS * MEDIA);
}

#[test]
fn test_story_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hoard.db");

    let story = Story::new("My Frog", "device-A");
    let chapter = Chapter::new(story.id.clone(), "start");
    let story = story.with_entry_chapter(chapter.id.clone());
    let choice = Choice::new(chapter.id.clone(), chapter.id.clone(), "loop");

    {
        let ctl = controller_on(Database::open(&path).unwrap(), "device-A");
        ctl.add(story.clone(), EntityType::CreatedStory).unwrap();
        ctl.add(chapter.clone(), EntityType::Chapter).unwrap();
        ctl.add(choice.clone(), EntityType::Choice).unwrap();
    }

    let reopened = controller_on(Database::open(&path).unwrap(), "device-B");
    assert!(reopened.all_stories(EntityType::CreatedStory).unwrap().is_empty());
    assert_eq!(reopened.all_stories(EntityType::CachedStory).unwrap().len(), 1);

    let assembled = reopened.complete_story(&story.id).unwrap();
    let entry = assembled.entry_chapter().unwrap();
    assert_eq!(entry.text, "start");
    assert_eq!(entry.choices, vec![choice]);
}

#[test]
fn test_registry_shared_across_threads() {
    let registry = Arc::new(Registry::new(Database::open_in_memory().unwrap()));
    let story = Story::new("Crowd", "device-A");
    registry.stories().insert(&story).unwrap();

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let story_id = story.id.clone();
            thread::spawn(move || {
                let chapter = Chapter::new(story_id, format!("written by worker {}", i));
                registry.chapters().insert(&chapter).unwrap();
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let ctl = Controller::new(registry, "device-A");
    assert_eq!(ctl.all_chapters(&story.id).unwrap().len(), 4);
}

#[test]
fn test_errors_surface_through_controller() {
    let ctl = controller_on(Database::open_in_memory().unwrap(), "device-A");
    let ghost = EntityId::generate();

    assert!(matches!(ctl.complete_story(&ghost), Err(Error::NotFound { .. })));
    assert!(matches!(
        ctl.add(Choice::new(ghost.clone(), ghost, "nowhere"), EntityType::Media),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_listing_tolerates_ids_written_elsewhere() {
    let db = Database::open_in_memory().unwrap();
    let ctl = controller_on(db.clone(), "device-A");
    ctl.add(Story::new("Fresh", "device-A"), EntityType::CreatedStory).unwrap();
    db.with_connection(|conn| {
        conn.execute(
            "INSERT INTO stories (story_id, title, owner) VALUES ('legacy id', 'Old', 'other')",
            [],
        )?;
        Ok(())
    })
    .unwrap();

    let published = ctl.all_stories(EntityType::PublishedStory).unwrap();
    assert_eq!(published.len(), 2);

    let cached = ctl.all_stories(EntityType::CachedStory).unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id.as_str(), "legacy id");
    assert!(ctl.complete_story(&cached[0].id).unwrap().chapters.is_empty());
}
