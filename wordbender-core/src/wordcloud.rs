use crate::dialogue::DialogueTable;
use crate::error::{DialogueError, Result};
use crate::roster::Palette;
use image::{DynamicImage, GrayImage, Rgb, Rgba};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};
use wcloud::{Tokenizer, WordCloud, WordCloudSize};

pub const DEFAULT_ASSETS_DIR: &str = "../atla files";

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("stopwords.txt")
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect()
});

pub fn stopwords() -> &'static HashSet<&'static str> {
    &STOPWORDS
}

/// Where a rendered cloud is drawn.
pub trait CloudSurface {
    fn draw(&mut self, image: &DynamicImage);
    fn set_title(&mut self, title: &str, color: Rgb<u8>);
}

/// Surface that simply keeps the last image and title drawn on it.
#[derive(Debug, Default)]
pub struct ImageSurface {
    pub image: Option<DynamicImage>,
    pub title: Option<String>,
    pub title_color: Option<Rgb<u8>>,
}

impl CloudSurface for ImageSurface {
    fn draw(&mut self, image: &DynamicImage) {
        self.image = Some(image.clone());
    }

    fn set_title(&mut self, title: &str, color: Rgb<u8>) {
        self.title = Some(title.to_string());
        self.title_color = Some(color);
    }
}

pub struct CloudOptions {
    /// Directory holding the mask images, and the output when saving
    pub assets_dir: PathBuf,
    pub save: bool,
    pub palette: Palette,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            save: false,
            palette: Palette::default(),
        }
    }
}

/// Every line the character speaks across the table, lower-cased and joined.
pub fn character_text(table: &DialogueTable, character: &str) -> Result<String> {
    let episodes = table.column(character)?;
    let joined = episodes
        .iter()
        .map(|lines| lines.join(" "))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(joined.to_lowercase())
}

/// "ty lee" -> "Ty lee Wordcloud"
pub fn cloud_title(character: &str) -> String {
    let mut chars = character.chars();
    let name = match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    };
    format!("{} Wordcloud", name)
}

pub fn cloud_file_name(character: &str) -> String {
    format!("{} wordcloud.png", character)
}

/// Renderer only places words on pixels that are exactly 0, so anything that
/// is not pure white becomes drawable.
pub fn binarize_mask(mut mask: GrayImage) -> GrayImage {
    for pixel in mask.pixels_mut() {
        pixel.0[0] = if pixel.0[0] == u8::MAX { u8::MAX } else { 0 };
    }
    mask
}

fn cloud_tokenizer() -> Tokenizer {
    Tokenizer::default()
        .with_max_words(750)
        .with_filter(STOPWORDS.clone())
}

/// Renders a character's word cloud inside the silhouette `mask_name` (a file
/// in the assets directory) onto `surface`.
///
/// Pure white mask pixels are left empty; every other pixel can hold words.
/// Returns the written path when `options.save` is set.
pub fn make_wordcloud<S: CloudSurface>(
    surface: &mut S,
    table: &DialogueTable,
    character: &str,
    mask_name: &str,
    options: &CloudOptions,
) -> Result<Option<PathBuf>> {
    let text = character_text(table, character)?;
    // Numbers and stopwords are dropped by the tokenizer, and the renderer
    // panics when nothing is left.
    if cloud_tokenizer()
        .get_normalized_word_frequencies(&text)
        .is_empty()
    {
        return Err(DialogueError::EmptyDialogue(character.to_string()));
    }

    let mask_path = options.assets_dir.join(mask_name);
    debug!("Loading mask {}", mask_path.display());
    let mask = binarize_mask(image::open(&mask_path)?.to_luma8());

    let wordcloud = WordCloud::default()
        .with_tokenizer(cloud_tokenizer())
        .with_background_color(Rgba([255, 255, 255, 255]));

    let cloud = DynamicImage::from(wordcloud.generate_from_text(
        &text,
        WordCloudSize::FromMask(mask),
        1.0,
    ));

    surface.draw(&cloud);
    surface.set_title(&cloud_title(character), options.palette.color_for(character));

    if !options.save {
        return Ok(None);
    }

    let out_path = options.assets_dir.join(cloud_file_name(character));
    save_cloud(&cloud, &out_path)?;
    Ok(Some(out_path))
}

fn save_cloud(cloud: &DynamicImage, path: &Path) -> Result<()> {
    cloud.save(path)?;
    info!("Saved word cloud to {}", path.display());
    Ok(())
}
