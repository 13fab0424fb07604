//! Integration tests for writing story pack archives
//!
//! Builds graphs through the public API, writes them to disk, and reads the
//! archive back to check layout and manifest contents.

use std::collections::HashSet;

use super::common::fixtures::{MediaDir, OpenedPack};
use storypack::{
    assemble, Config, CoverKey, NodeConfig, Pack, PackDescription, PackError, StoryEntry,
    StoryGraph,
};

/// Cover "Demo" with question "Pick one" and options A and B
fn demo_pack(media: &MediaDir) -> (Pack, CoverKey) {
    let mut graph = StoryGraph::new();
    let question = graph.add_question(
        "Pick one",
        NodeConfig::new().with_audio(media.audio("question.mp3")),
    );
    let menu = graph.add_menu(question);
    let cover = graph.add_cover(
        "Demo",
        NodeConfig::new()
            .with_audio(media.audio("title.mp3"))
            .with_image(media.image("logo.png", 64, 48)),
    );
    graph.set_menu(cover, menu);

    for title in ["A", "B"] {
        let option = graph.add_option(
            title,
            NodeConfig::new().with_audio(media.audio(&format!("{title}-title.mp3"))),
        );
        graph.push_option(menu, option);
        let story = graph
            .add_story(
                cover,
                format!("Story{title}"),
                NodeConfig::new().with_audio(media.audio(&format!("{title}.mp3"))),
            )
            .expect("cover has a menu");
        graph.set_ok_transition(option, story);
    }

    (Pack::new("Demo", graph).with_cover(cover), cover)
}

#[test]
fn test_demo_pack_layout() {
    let media = MediaDir::new();
    let (pack, _) = demo_pack(&media);
    let out = media.join("pack.zip");

    let summary = pack.write_to(&out).expect("packaging failed");
    assert_eq!(summary.nodes, 6);
    assert_eq!(summary.actions, 4);
    assert_eq!(summary.assets, 7);
    assert!(!summary.thumbnail);

    let mut opened = OpenedPack::open(&out);
    let manifest = opened.manifest();

    let names: Vec<&str> = manifest.stage_nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["Demo", "Pick one", "A", "StoryA", "B", "StoryB"]);

    let kinds: Vec<&str> = manifest.action_nodes.iter().map(|a| a.kind.as_str()).collect();
    assert_eq!(
        kinds,
        [
            "menu.questionaction",
            "menu.optionsaction",
            "story.storyaction",
            "story.storyaction"
        ]
    );

    let node_id = |name: &str| {
        manifest
            .stage_nodes
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.uuid.clone())
            .unwrap()
    };
    assert_eq!(manifest.action_nodes[0].options, vec![node_id("Pick one")]);
    assert_eq!(manifest.action_nodes[1].options, vec![node_id("A"), node_id("B")]);
    assert_eq!(manifest.action_nodes[2].options, vec![node_id("StoryA")]);
    assert_eq!(manifest.action_nodes[3].options, vec![node_id("StoryB")]);

    assert_eq!(manifest.format, "v1");
    assert_eq!(manifest.version, 1);
    assert_eq!(manifest.title, "Demo");
}

#[test]
fn test_ids_are_unique_and_references_close() {
    let media = MediaDir::new();
    let (pack, _) = demo_pack(&media);
    let out = media.join("pack.zip");
    pack.write_to(&out).unwrap();
    let manifest = OpenedPack::open(&out).manifest();

    let node_ids: HashSet<&str> = manifest.stage_nodes.iter().map(|n| n.uuid.as_str()).collect();
    let action_ids: HashSet<&str> = manifest.action_nodes.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(node_ids.len(), manifest.stage_nodes.len());
    assert_eq!(action_ids.len(), manifest.action_nodes.len());

    for action in &manifest.action_nodes {
        for option in &action.options {
            assert!(node_ids.contains(option.as_str()), "dangling option {option}");
        }
    }
    for node in &manifest.stage_nodes {
        for transition in [&node.ok_transition, &node.home_transition].into_iter().flatten() {
            assert!(action_ids.contains(transition.action_node.as_str()));
            assert_eq!(transition.option_index, 0);
        }
    }
}

#[test]
fn test_story_routes_back_to_cover_entry_action() {
    let media = MediaDir::new();
    let (pack, _) = demo_pack(&media);
    let manifest = pack.manifest().unwrap();

    let cover = &manifest.stage_nodes[0];
    let entry = cover.ok_transition.clone().expect("cover enters the menu");
    assert_eq!(cover.square_one, Some(true));
    assert!(cover.group_id.is_none());

    for story in manifest.stage_nodes.iter().filter(|n| n.kind == "story") {
        assert_eq!(story.ok_transition.as_ref(), Some(&entry));
        assert_eq!(story.home_transition.as_ref(), Some(&entry));
        assert_eq!(story.group_id.as_deref(), Some(story.uuid.as_str()));
    }

    let entry_count = manifest
        .action_nodes
        .iter()
        .filter(|a| a.id == entry.action_node)
        .count();
    assert_eq!(entry_count, 1);
}

#[test]
fn test_assets_are_rewritten_and_copied() {
    let media = MediaDir::new();
    let (pack, _) = demo_pack(&media);
    let out = media.join("pack.zip");
    pack.write_to(&out).unwrap();

    let mut opened = OpenedPack::open(&out);
    let manifest = opened.manifest();
    let entries = opened.entry_names();
    assert!(entries.contains("assets/"));
    assert!(entries.contains("story.json"));
    assert!(!entries.contains("thumbnail.png"));

    let cover = &manifest.stage_nodes[0];
    assert_eq!(
        cover.image.as_deref(),
        Some(format!("assets/{}.png", cover.uuid).as_str())
    );

    for node in &manifest.stage_nodes {
        let audio = node.audio.as_deref().expect("every demo node has audio");
        assert_eq!(audio, format!("assets/{}.mp3", node.uuid));
        assert!(entries.contains(audio));
    }

    let story_a = manifest.stage_nodes.iter().find(|n| n.name == "StoryA").unwrap();
    let bytes = opened.read(story_a.audio.as_deref().unwrap());
    assert_eq!(bytes, b"A.mp3");
}

#[test]
fn test_thumbnail_is_cropped_into_archive_root() {
    let media = MediaDir::new();
    let (pack, _) = demo_pack(&media);
    let pack = pack
        .with_image(media.image("cover.png", 1000, 500))
        .with_description("A demo pack");
    let out = media.join("pack.zip");

    let summary = pack.write_to(&out).unwrap();
    assert!(summary.thumbnail);

    let mut opened = OpenedPack::open(&out);
    let thumb = image::load_from_memory(&opened.read("thumbnail.png")).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (320, 240));
    assert_eq!(opened.manifest().description, "A demo pack");
}

#[test]
fn test_entries_are_written_in_pack_order() {
    let media = MediaDir::new();
    let (pack, _) = demo_pack(&media);
    let out = media.join("pack.zip");
    pack.with_image(media.image("cover.png", 640, 480))
        .write_to(&out)
        .unwrap();

    let mut opened = OpenedPack::open(&out);
    let manifest = opened.manifest();
    let order = opened.entry_order();

    let mut expected = vec!["assets/".to_string(), "thumbnail.png".to_string()];
    for node in &manifest.stage_nodes {
        expected.extend(node.image.clone());
        expected.extend(node.audio.clone());
    }
    expected.push("story.json".to_string());
    assert_eq!(order, expected);

    // The cover carries both media, image first.
    let cover = &manifest.stage_nodes[0].uuid;
    assert_eq!(order[2], format!("assets/{cover}.png"));
    assert_eq!(order[3], format!("assets/{cover}.mp3"));
}

#[test]
fn test_thumbnail_workdir_is_removed() {
    let media = MediaDir::new();
    let scratch = media.join("scratch");
    std::fs::create_dir(&scratch).unwrap();

    let (pack, _) = demo_pack(&media);
    pack.with_image(media.image("cover.png", 320, 240))
        .with_scratch_dir(&scratch)
        .write_to(&media.join("ok.zip"))
        .unwrap();
    assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);

    let (pack, _) = demo_pack(&media);
    let err = pack
        .with_image(media.audio("broken.png"))
        .with_scratch_dir(&scratch)
        .write_to(&media.join("failed.zip"))
        .unwrap_err();
    assert!(matches!(err, PackError::Thumbnail(_)));
    assert!(!media.join("failed.zip").exists());
    assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);
}

#[test]
fn test_missing_cover_produces_no_archive() {
    let media = MediaDir::new();
    let out = media.join("pack.zip");
    let err = Pack::new("Nothing", StoryGraph::new())
        .with_image(media.image("cover.png", 10, 10))
        .write_to(&out)
        .unwrap_err();

    assert!(matches!(err, PackError::MissingCover));
    assert!(!out.exists());
}

#[test]
fn test_thumbnail_failure_leaves_no_archive() {
    let media = MediaDir::new();
    let (pack, _) = demo_pack(&media);
    let bogus = media.audio("broken.png");
    let out = media.join("pack.zip");

    let err = pack.with_image(bogus).write_to(&out).unwrap_err();
    assert!(matches!(err, PackError::Thumbnail(_)));
    assert!(!out.exists());

    let leftovers: Vec<_> = std::fs::read_dir(&media.path)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(".storypack-"))
        .collect();
    assert!(leftovers.is_empty(), "staging file left behind");
}

#[test]
fn test_existing_output_survives_failed_packaging() {
    let media = MediaDir::new();
    let out = media.join("pack.zip");
    std::fs::write(&out, b"previous pack").unwrap();

    let mut graph = StoryGraph::new();
    let question = graph.add_question("Pick one", NodeConfig::new());
    let menu = graph.add_menu(question);
    let cover = graph.add_cover("Demo", NodeConfig::new());
    graph.set_menu(cover, menu);
    let option = graph.add_option("A", NodeConfig::new());
    graph.push_option(menu, option);
    let story = graph
        .add_story(cover, "A", NodeConfig::new().with_audio(media.join("gone.mp3")))
        .unwrap();
    graph.set_ok_transition(option, story);

    let err = Pack::new("Demo", graph).with_cover(cover).write_to(&out).unwrap_err();
    assert!(matches!(err, PackError::AssetUnreadable { .. }));
    assert_eq!(std::fs::read(&out).unwrap(), b"previous pack");
}

#[test]
fn test_assembled_description_packs_end_to_end() {
    let media = MediaDir::new();
    let description = PackDescription {
        title: "Podcast".into(),
        image: Some(media.image("logo.png", 400, 400)),
        cover_audio: Some(media.audio("title.mp3")),
        stories: vec![
            StoryEntry {
                title: "Episode 1".into(),
                audio: Some(media.audio("ep1.mp3")),
                image: Some(media.image("ep1.png", 32, 32)),
                title_audio: Some(media.audio("ep1-title.mp3")),
            },
            StoryEntry {
                title: "Episode 2".into(),
                audio: Some(media.audio("ep2.mp3")),
                image: None,
                title_audio: None,
            },
        ],
        ..PackDescription::default()
    };

    let out = media.join("podcast.zip");
    let summary = assemble(&description, &Config::default())
        .unwrap()
        .write_to(&out)
        .unwrap();
    // cover image + cover audio + ep1 option image + ep1 title + ep1 audio + ep2 audio
    assert_eq!(summary.assets, 6);
    assert!(summary.thumbnail);

    let mut opened = OpenedPack::open(&out);
    let manifest = opened.manifest();
    let question = &manifest.stage_nodes[1];
    assert_eq!(question.audio, None);
    assert!(question.control_settings.autoplay);

    let episode_two = &manifest.stage_nodes[4];
    assert_eq!(episode_two.kind, "menu.optionstage");
    assert_eq!(episode_two.image, None);
    assert_eq!(episode_two.audio, None);
    assert!(opened.entry_names().contains("thumbnail.png"));
}
