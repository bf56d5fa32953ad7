//! Catalogue rendering from a published index file.

use tempfile::TempDir;

use vtcat_catalogue::{render_index_file, write_index};
use vtcat_core::{ChannelInfo, CreatorProfile, CreatorRow, Platform};

fn channel(row: &CreatorRow, platform: Platform) -> ChannelInfo {
    ChannelInfo {
        id: row.id(),
        name: format!("{} on {platform}", row.name),
        description: String::new(),
        url: format!("https://example.com/{platform}/{}", row.name),
        icon: true,
        cover: false,
    }
}

#[tokio::test]
async fn two_entries_render_two_cards_in_order() {
    let tmp = TempDir::new().unwrap();
    let index = tmp.path().join("index.json");
    let output = tmp.path().join("site/catalogue.html");

    let first_row = CreatorRow::from_cells(&["First"]);
    let mut first = CreatorProfile::new(&first_row);
    first.set_channel(Platform::Vk, channel(&first_row, Platform::Vk));

    let second_row = CreatorRow::from_cells(&["Second"]);
    let mut second = CreatorProfile::new(&second_row);
    for platform in Platform::ALL {
        second.set_channel(platform, channel(&second_row, platform));
    }

    write_index(&[first.clone(), second.clone()], &[index.as_path()])
        .await
        .unwrap();
    let rendered = render_index_file(&index, &output, "upload/vtubers")
        .await
        .unwrap();
    assert_eq!(rendered, 2);

    let html = std::fs::read_to_string(&output).unwrap();
    let cards: Vec<&str> = html.split(r#"<div class="col">"#).skip(1).collect();
    assert_eq!(cards.len(), 2);
    assert!(cards[0].contains(first.id.as_str()));
    assert!(cards[1].contains(second.id.as_str()));
    assert_eq!(cards[0].matches("btn btn-social").count(), 1);
    assert!(cards[0].contains("btn-social vk"));
    assert_eq!(cards[1].matches("btn btn-social").count(), 3);
}

#[tokio::test]
async fn malformed_index_renders_empty_container() {
    let tmp = TempDir::new().unwrap();
    let index = tmp.path().join("index.json");
    let output = tmp.path().join("catalogue.html");
    std::fs::write(&index, "[{\"id\":").unwrap();

    let rendered = render_index_file(&index, &output, "upload/vtubers")
        .await
        .unwrap();

    assert_eq!(rendered, 0);
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains(r#"id="vtuber-catalogue""#));
    assert!(!html.contains("card"));
}

#[tokio::test]
async fn missing_index_renders_empty_container() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("catalogue.html");

    let rendered = render_index_file(&tmp.path().join("absent.json"), &output, "upload/vtubers")
        .await
        .unwrap();

    assert_eq!(rendered, 0);
    assert!(output.is_file());
}
