//! Derived display rules: nothing here is stored, everything is computed
//! from the current state of the store at read time.

use color_eyre::eyre::{Context, OptionExt, Result};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::database::Database;
use crate::entities;
use crate::transform::truncate_display;

/// Descriptive label for a slider: its name plus the name of whatever
/// references it (an article, or a text block's subdivision). A slider
/// nobody references is labelled "(без привязки)". Missing owners are
/// simply absent, never errors.
pub async fn slider_label(
    db: &Database,
    slider: &entities::image_slider::Model,
) -> Result<String> {
    let mut owner = String::new();

    let article = entities::article::Entity::find()
        .filter(entities::article::Column::SliderId.eq(slider.id))
        .one(&db.conn)
        .await
        .context("Failed to look up slider's article")?;
    if let Some(article) = article {
        owner.push_str(&article.name);
    }

    let block = entities::text_block::Entity::find()
        .filter(entities::text_block::Column::SliderId.eq(slider.id))
        .one(&db.conn)
        .await
        .context("Failed to look up slider's text block")?;
    if let Some(block) = block {
        let subdivision = entities::subdivision::Entity::find_by_id(block.subdivision_id)
            .one(&db.conn)
            .await
            .context("Failed to look up text block's subdivision")?;
        if let Some(name) = subdivision.and_then(|s| s.name).filter(|n| !n.is_empty()) {
            if !owner.is_empty() {
                owner.push_str(" | ");
            }
            owner.push_str(&name);
        }
    }

    Ok(if owner.is_empty() {
        format!("{} (без привязки)", slider.name)
    } else {
        format!("{} | {}", slider.name, owner)
    })
}

/// Dense 1-based position of an image within its slider, by creation
/// order. Gaps in ids (deleted siblings) do not show up in the positions.
pub async fn image_unit_position(
    db: &Database,
    unit: &entities::image_unit::Model,
) -> Result<usize> {
    let siblings = db.list_image_units(unit.slider_id).await?;
    siblings
        .iter()
        .position(|sibling| sibling.id == unit.id)
        .map(|rank| rank + 1)
        .ok_or_eyre("Image unit is not part of its slider's set")
}

/// One-line admin summary of a song: "Singer -> Name", flagged for albums.
pub fn song_summary(singer_name: &str, song: &entities::song::Model) -> String {
    if song.is_album {
        format!("{} -> {} | Альбом", singer_name, song.name)
    } else {
        format!("{} -> {}", singer_name, song.name)
    }
}

/// One-line admin summary of a text block, both parts shortened to keep
/// listings readable.
pub fn text_block_summary(
    subdivision_name: Option<&str>,
    block: &entities::text_block::Model,
) -> String {
    format!(
        "{} -> {}",
        truncate_display(subdivision_name.unwrap_or("")),
        truncate_display(&block.text)
    )
}
