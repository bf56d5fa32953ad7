//! End-to-end catalogue builds against wiremock-backed platform APIs.

use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vtcat_catalogue::{build_catalogue, read_index, write_index, Aggregator, FrontMatter};
use vtcat_core::{CreatorId, CreatorRow, Platform};
use vtcat_platforms::{
    build_http_client, PlatformClient, PlatformClients, TwitchClient, VkClient, YoutubeClient,
};

const FEED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom"><title>Alice Channel</title></feed>"#;

const YT_ICON: &[u8] = b"youtube-icon-bytes";
const TWITCH_ICON: &[u8] = b"twitch-icon-bytes";
const VK_ICON: &[u8] = b"vk-icon-bytes";

fn clients(server: &MockServer) -> PlatformClients {
    let http = build_http_client(5, "vtcat-test/0.1").unwrap();
    let uri = server.uri();
    PlatformClients::new(vec![
        PlatformClient::Youtube(YoutubeClient::new(
            http.clone(),
            "yt-key",
            &format!("{uri}/feeds/videos.xml"),
            &format!("{uri}/youtube/v3"),
        )),
        PlatformClient::Twitch(TwitchClient::with_token(
            http.clone(),
            "cid",
            "app-token",
            &format!("{uri}/helix"),
        )),
        PlatformClient::Vk(VkClient::new(
            http,
            "vk-token",
            &format!("{uri}/method"),
            "5.131",
            Duration::ZERO,
        )),
    ])
}

async fn mount_image(server: &MockServer, image_path: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}

async fn mount_youtube(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/feeds/videos.xml"))
        .and(query_param("channel_id", "UC123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_XML))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("id", "UC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UC123",
                "snippet": {
                    "title": "Alice Channel",
                    "description": "Привет",
                    "thumbnails": {"high": {"url": format!("{}/img/yt.jpg", server.uri())}}
                }
            }]
        })))
        .mount(server)
        .await;
    mount_image(server, "/img/yt.jpg", YT_ICON).await;
}

async fn mount_twitch(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/helix/users"))
        .and(query_param("login", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "login": "alice",
                "display_name": "AliceLive",
                "description": "streams",
                "profile_image_url": format!("{}/img/tw.jpg", server.uri()),
                "offline_image_url": ""
            }]
        })))
        .mount(server)
        .await;
    mount_image(server, "/img/tw.jpg", TWITCH_ICON).await;
}

async fn mount_vk(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/method/groups.getById"))
        .and(query_param("group_id", "alice_vt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [{
                "id": 1,
                "name": "Alice VK",
                "description": "group",
                "photo_200": format!("{}/img/vk.jpg", server.uri())
            }]
        })))
        .mount(server)
        .await;
    mount_image(server, "/img/vk.jpg", VK_ICON).await;
}

fn alice_row(preferred: &str, with_all: bool) -> CreatorRow {
    let (twitch, vk) = if with_all {
        ("https://www.twitch.tv/alice", "https://vk.com/alice_vt")
    } else {
        ("", "")
    };
    CreatorRow::from_cells(&[
        "Alice",
        "アリス",
        "https://www.youtube.com/channel/UC123",
        twitch,
        vk,
        "",
        "",
        preferred,
    ])
}

#[tokio::test]
async fn single_platform_creator_end_to_end() {
    let server = MockServer::start().await;
    mount_youtube(&server).await;
    let tmp = TempDir::new().unwrap();
    let clients = clients(&server);
    let aggregator = Aggregator::new(&clients, tmp.path());

    let (profiles, summary) = build_catalogue(&[alice_row("", false)], &aggregator).await;

    assert_eq!(summary.retained, 1);
    assert_eq!(profiles.len(), 1);
    let alice = &profiles[0];
    assert_eq!(alice.id, CreatorId::from_name("Alice"));
    assert_eq!(alice.id.as_str(), "64489c85dc2fe0787b85cd87214b3810");
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.name_variant, "アリス");
    assert!(alice.twitch.is_none() && alice.vk.is_none());
    let yt = alice.youtube.as_ref().unwrap();
    assert_eq!(yt.name, "Alice Channel");
    assert_eq!(yt.description, "&#1055;&#1088;&#1080;&#1074;&#1077;&#1090;");
    assert!(yt.icon);
    assert!(!yt.cover);

    let dir = tmp.path().join(alice.id.as_str());
    for file in ["youtube.json", "youtube.xml", "youtube_icon.jpg", "main_icon.jpg", "index.md"] {
        assert!(dir.join(file).is_file(), "missing {file}");
    }
    assert_eq!(std::fs::read(dir.join("main_icon.jpg")).unwrap(), YT_ICON);

    let document = std::fs::read_to_string(dir.join("index.md")).unwrap();
    let front = FrontMatter::parse(&document).unwrap();
    assert_eq!(front.vtuber_id, alice.id.as_str());
    assert!(front.youtube.is_some());
    assert!(front.twitch.is_none());
    assert!(front.vk.is_none());
}

#[tokio::test]
async fn preferred_platform_icon_becomes_main_icon() {
    let server = MockServer::start().await;
    mount_youtube(&server).await;
    mount_twitch(&server).await;
    mount_vk(&server).await;
    let tmp = TempDir::new().unwrap();
    let clients = clients(&server);
    let aggregator = Aggregator::new(&clients, tmp.path());

    let (profiles, _) = build_catalogue(&[alice_row("vk", true)], &aggregator).await;

    let alice = &profiles[0];
    assert_eq!(
        alice.channels().map(|(p, _)| p).collect::<Vec<_>>(),
        Platform::ALL.to_vec()
    );
    let dir = tmp.path().join(alice.id.as_str());
    assert_eq!(
        std::fs::read(dir.join("main_icon.jpg")).unwrap(),
        std::fs::read(dir.join("vk_icon.jpg")).unwrap()
    );
    assert_eq!(std::fs::read(dir.join("main_icon.jpg")).unwrap(), VK_ICON);
    assert_eq!(alice.twitch.as_ref().unwrap().name, "AliceLive");
}

#[tokio::test]
async fn unresolved_preference_falls_back_to_fixed_order() {
    let server = MockServer::start().await;
    mount_youtube(&server).await;
    mount_twitch(&server).await;
    // No vk mock: the group lookup 404s and vk stays unresolved.
    let tmp = TempDir::new().unwrap();
    let clients = clients(&server);
    let aggregator = Aggregator::new(&clients, tmp.path());

    let (profiles, _) = build_catalogue(&[alice_row("vk", true)], &aggregator).await;

    let alice = &profiles[0];
    assert!(alice.vk.is_none());
    let dir = tmp.path().join(alice.id.as_str());
    assert_eq!(std::fs::read(dir.join("main_icon.jpg")).unwrap(), YT_ICON);
}

#[tokio::test]
async fn blank_row_leaves_only_an_empty_folder() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    let clients = clients(&server);
    let aggregator = Aggregator::new(&clients, tmp.path());
    let row = CreatorRow::from_cells(&["Ghost", "", " ", "", ""]);

    let (profiles, summary) = build_catalogue(&[row.clone()], &aggregator).await;

    assert!(profiles.is_empty());
    assert_eq!(summary.dropped, 1);
    let dir = tmp.path().join(row.id().as_str());
    assert!(dir.is_dir());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn index_round_trips_in_feed_order() {
    let server = MockServer::start().await;
    mount_youtube(&server).await;
    mount_vk(&server).await;
    let tmp = TempDir::new().unwrap();
    let clients = clients(&server);
    let creators = tmp.path().join("vtubers");
    let aggregator = Aggregator::new(&clients, &creators);
    let rows = vec![
        CreatorRow::from_cells(&["Бета", "", "", "", "https://vk.com/alice_vt"]),
        alice_row("", false),
    ];

    let (profiles, _) = build_catalogue(&rows, &aggregator).await;
    let work = creators.join("index.json");
    let site = tmp.path().join("_data/vtubers.json");
    write_index(&profiles, &[work.as_path(), site.as_path()])
        .await
        .unwrap();

    let decoded = read_index(&work).await.unwrap();
    assert_eq!(decoded, profiles);
    assert_eq!(decoded[0].name, "Бета");
    assert_eq!(decoded[1].name, "Alice");
    assert_eq!(read_index(&site).await.unwrap(), profiles);
}

#[tokio::test]
async fn repeated_name_keeps_the_first_creator() {
    let server = MockServer::start().await;
    for (group, name) in [("one", "First group"), ("two", "Second group")] {
        Mock::given(method("GET"))
            .and(path("/method/groups.getById"))
            .and(query_param("group_id", group))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": [{"id": 1, "name": name, "description": ""}]
            })))
            .mount(&server)
            .await;
    }
    let tmp = TempDir::new().unwrap();
    let clients = clients(&server);
    let aggregator = Aggregator::new(&clients, tmp.path());
    let rows = vec![
        CreatorRow::from_cells(&["Alice", "", "", "", "https://vk.com/one"]),
        CreatorRow::from_cells(&["Alice", "", "", "", "https://vk.com/two"]),
    ];

    let (profiles, summary) = build_catalogue(&rows, &aggregator).await;

    assert_eq!(profiles.len(), 1);
    assert_eq!(summary.retained, 1);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(profiles[0].vk.as_ref().unwrap().url, "https://vk.com/one");

    let dir = tmp.path().join(profiles[0].id.as_str());
    let raw = std::fs::read_to_string(dir.join("vk.json")).unwrap();
    assert!(raw.contains("First group"));
    let document = std::fs::read_to_string(dir.join("index.md")).unwrap();
    let front = FrontMatter::parse(&document).unwrap();
    assert_eq!(front.vk.unwrap().url, "https://vk.com/one");

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests
        .iter()
        .all(|r| r.url.query().is_none_or(|q| !q.contains("group_id=two"))));
}
