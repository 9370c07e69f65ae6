//! Built-in style presets, grouped by [`StyleCategory`].

use crate::domain::{StyleCategory, StyleDescriptor};

pub static MAP_STYLES: &[StyleDescriptor] = &[
    StyleDescriptor {
        id: "realistic",
        name: "Realistic Map",
        category: StyleCategory::Cartographic,
        description: "Similar to Google Maps, faithful roads, natural colors.",
        prompt_fragment: "ultra-realistic professional street map, google maps aesthetic, natural green and blue tones, accurate urban infrastructure",
        icon: "🗺️",
    },
    StyleDescriptor {
        id: "topo",
        name: "Topographic Map",
        category: StyleCategory::Cartographic,
        description: "Contour lines, accented relief, detailed rivers.",
        prompt_fragment: "detailed topographic map with elevation contour lines, relief shading, mountain peaks, and flowing river systems",
        icon: "🏔️",
    },
    StyleDescriptor {
        id: "minimalist",
        name: "Minimalist Map",
        category: StyleCategory::Cartographic,
        description: "Few colors, simple roads, very readable.",
        prompt_fragment: "clean modern minimalist map, simple flat lines, limited neutral color palette, high legibility",
        icon: "⚪",
    },
    StyleDescriptor {
        id: "bw",
        name: "B&W Map",
        category: StyleCategory::Cartographic,
        description: "High contrast, graphic design, ideal for printing.",
        prompt_fragment: "high contrast black and white graphic street map, bold ink lines, professional printing aesthetic",
        icon: "⚫",
    },
    StyleDescriptor {
        id: "monochrome",
        name: "Monochrome Map",
        category: StyleCategory::Cartographic,
        description: "Single dominant color, very stylish (poster).",
        prompt_fragment: "stylish monochromatic map poster, single dominant hue with varying shades, sophisticated interior design style",
        icon: "🟦",
    },
    StyleDescriptor {
        id: "rpg-fantasy",
        name: "Fantasy RPG Map",
        category: StyleCategory::Gaming,
        description: "Parchment, irregular paths, drawn forests.",
        prompt_fragment: "fantasy world map on old yellowed parchment, hand-drawn medieval paths, illustrated pine forests and dragon peaks",
        icon: "🧙‍♂️",
    },
    StyleDescriptor {
        id: "rpg-modern",
        name: "Modern RPG Map",
        category: StyleCategory::Gaming,
        description: "MMO inspired, quest icons, district zones.",
        prompt_fragment: "modern MMORPG world map UI, quest icons, glowing objective markers, distinct colorful territory zones",
        icon: "🎮",
    },
    StyleDescriptor {
        id: "open-world",
        name: "Open-World Map",
        category: StyleCategory::Gaming,
        description: "GTA / Watch Dogs style, thick roads, clear zones.",
        prompt_fragment: "action game mini-map style like GTA or Watch Dogs, thick neon-lit roads, high contrast dark theme, bold district borders",
        icon: "🚗",
    },
    StyleDescriptor {
        id: "isometric",
        name: "Isometric Map",
        category: StyleCategory::Gaming,
        description: "Tilted 3D view, management game vibe.",
        prompt_fragment: "isometric 3D perspective city map, sim-city tycoon style, detailed 3D building blocks and infrastructure",
        icon: "🏗️",
    },
    StyleDescriptor {
        id: "pixel-art",
        name: "Pixel Art Map",
        category: StyleCategory::Gaming,
        description: "8-bit / 16-bit, visible grid, nostalgic.",
        prompt_fragment: "16-bit retro pixel art city map, visible square grid, vibrant nostalgic colors, old-school video game vibe",
        icon: "👾",
    },
    StyleDescriptor {
        id: "hand-drawn",
        name: "Hand-Drawn Map",
        category: StyleCategory::Artistic,
        description: "Irregular lines, sketchbook effect.",
        prompt_fragment: "artist sketchbook hand-drawn map, loose graphite pencil lines, irregular organic strokes, notebook paper texture",
        icon: "✍️",
    },
    StyleDescriptor {
        id: "watercolor",
        name: "Watercolor Map",
        category: StyleCategory::Artistic,
        description: "Diffuse colors, very soft.",
        prompt_fragment: "watercolor painting map, bleeding pastel colors, soft edges, artistic fluid wash effect",
        icon: "🎨",
    },
    StyleDescriptor {
        id: "ink",
        name: "Inked Map",
        category: StyleCategory::Artistic,
        description: "Black ink, engraving effect.",
        prompt_fragment: "black ink etching map, woodcut illustration style, fine cross-hatching, intense line detail",
        icon: "🖋️",
    },
    StyleDescriptor {
        id: "vintage-paper",
        name: "Old Paper Map",
        category: StyleCategory::Artistic,
        description: "Aged, stains, tears.",
        prompt_fragment: "antique historical map, aged paper with coffee stains, torn edges, faded ink, 18th century exploration feel",
        icon: "📜",
    },
    StyleDescriptor {
        id: "manga",
        name: "Manga / Anime Map",
        category: StyleCategory::Artistic,
        description: "Sharp lines, stylized city.",
        prompt_fragment: "japanese anime background art map style, clean cel-shading, vibrant lighting, stylized urban layout",
        icon: "🍱",
    },
    StyleDescriptor {
        id: "cyberpunk",
        name: "Cyberpunk Map",
        category: StyleCategory::Futuristic,
        description: "Neons, dark background, glow.",
        prompt_fragment: "cyberpunk neon city grid, pitch black background, glowing electric pink and teal roads, rain-slicked aesthetic",
        icon: "🌃",
    },
    StyleDescriptor {
        id: "holographic",
        name: "Holographic Map",
        category: StyleCategory::Futuristic,
        description: "Transparency, projection effect.",
        prompt_fragment: "3D translucent holographic projection map, glowing blue light layers, digital noise, sci-fi interface",
        icon: "💎",
    },
    StyleDescriptor {
        id: "techno-hud",
        name: "Techno HUD Map",
        category: StyleCategory::Futuristic,
        description: "Futuristic interface, grids and figures.",
        prompt_fragment: "tactical HUD military map display, scanning lines, numeric coordinates, digital targeting overlays",
        icon: "📡",
    },
    StyleDescriptor {
        id: "ia-data",
        name: "AI / Data Map",
        category: StyleCategory::Futuristic,
        description: "Data flow, dynamic lines.",
        prompt_fragment: "big data visualization map, dynamic flow lines representing traffic, neural network nodes, glowing pulse effects",
        icon: "🧠",
    },
    StyleDescriptor {
        id: "blueprint",
        name: "Blueprint Map",
        category: StyleCategory::Technical,
        description: "Blue + white, technical lines.",
        prompt_fragment: "architectural blueprint map, cyanotype blue background, white technical drafting lines, engineering details",
        icon: "📐",
    },
    StyleDescriptor {
        id: "wireframe",
        name: "Wireframe Map",
        category: StyleCategory::Technical,
        description: "Outlines only, very clean.",
        prompt_fragment: "3D wireframe computer model map, glowing vector contours, empty mesh, digital skeleton of a city",
        icon: "🌐",
    },
    StyleDescriptor {
        id: "geometric",
        name: "Geometric Map",
        category: StyleCategory::Technical,
        description: "Simplified shapes, polygon districts.",
        prompt_fragment: "low-poly geometric city map, abstract polygonal district shapes, flat shaded facets, modern vector art",
        icon: "🔺",
    },
    StyleDescriptor {
        id: "abstract",
        name: "Abstract Map",
        category: StyleCategory::Technical,
        description: "Reinterpreted city, non-realistic.",
        prompt_fragment: "abstract modern art map, non-literal city interpretation, experimental shapes and vibrant splashes of color",
        icon: "🌀",
    },
    StyleDescriptor {
        id: "japanese",
        name: "Japanese Map",
        category: StyleCategory::Cultural,
        description: "Ukiyo-e aesthetic, calligraphy.",
        prompt_fragment: "traditional Ukiyo-e woodblock print style map, mount fuji aesthetic, kanji decorative elements, washi paper texture",
        icon: "🗾",
    },
    StyleDescriptor {
        id: "medieval",
        name: "Medieval Map",
        category: StyleCategory::Cultural,
        description: "Ancient symbols, heraldry.",
        prompt_fragment: "late medieval European city map, heraldic crests, castle icons, gothic calligraphy, walled city representation",
        icon: "🏰",
    },
    StyleDescriptor {
        id: "oriental",
        name: "Oriental Map",
        category: StyleCategory::Cultural,
        description: "Arabic motifs, warm colors.",
        prompt_fragment: "middle-eastern oriental map art, intricate arabesque borders, terracotta and sand colors, mosaic tile patterns",
        icon: "🕌",
    },
    StyleDescriptor {
        id: "art-deco",
        name: "Art Deco Map",
        category: StyleCategory::Cultural,
        description: "Symmetry, elegant lines.",
        prompt_fragment: "Art Deco architectural map style, symmetry, gold and black decorative lines, 1920s luxury aesthetic",
        icon: "🎷",
    },
    StyleDescriptor {
        id: "lego",
        name: "Lego Map",
        category: StyleCategory::Playful,
        description: "Brick roads, \"toy\" city.",
        prompt_fragment: "toy brick map world (Lego), plastic block studs, vibrant primary colors, playful isometric plastic city",
        icon: "🧱",
    },
    StyleDescriptor {
        id: "cartoon",
        name: "Cartoon Map",
        category: StyleCategory::Playful,
        description: "Bright colors, exaggerated shapes.",
        prompt_fragment: "bubbly cartoon city map, rounded exaggerated roads, bright playful colors, friendly animation style",
        icon: "🎈",
    },
    StyleDescriptor {
        id: "paper-cut",
        name: "Paper-Cut Map",
        category: StyleCategory::Playful,
        description: "Layered effect, soft shadows.",
        prompt_fragment: "layered paper-cut craft map, physical depth with drop shadows, colorful construction paper sheets",
        icon: "✂️",
    },
    StyleDescriptor {
        id: "chalkboard",
        name: "Chalkboard Map",
        category: StyleCategory::Playful,
        description: "Blackboard, white chalk.",
        prompt_fragment: "white chalk drawing on a dusty classroom blackboard, rough hand-sketched city map",
        icon: "🖍️",
    },
    StyleDescriptor {
        id: "glitch",
        name: "Glitch Map",
        category: StyleCategory::Playful,
        description: "Distortions, visual bugs.",
        prompt_fragment: "digital glitch art map, chromatic aberration, pixel distortion, data corruption aesthetics",
        icon: "📠",
    },
    StyleDescriptor {
        id: "post-apocalyptic",
        name: "Post-Apocalyptic Map",
        category: StyleCategory::Narrative,
        description: "Broken roads, forbidden zones.",
        prompt_fragment: "post-apocalyptic wasteland map, overgrown nature in streets, cracked pavement, radiation zones, rusty fallout vibe",
        icon: "☢️",
    },
    StyleDescriptor {
        id: "dystopian",
        name: "Dystopian Map",
        category: StyleCategory::Narrative,
        description: "Social divisions, walls, checkpoints.",
        prompt_fragment: "oppressive dystopian city map, massive grey concrete walls, surveillance districts, industrial pollution haze",
        icon: "👁️‍🗨️",
    },
    StyleDescriptor {
        id: "utopian",
        name: "Utopian Map",
        category: StyleCategory::Narrative,
        description: "Perfect city, soft symmetry.",
        prompt_fragment: "solar-punk utopian map, white eco-buildings, lush green parks, clean energy canals, harmonious urban design",
        icon: "🕊️",
    },
    StyleDescriptor {
        id: "dreamy",
        name: "Dreamy Map",
        category: StyleCategory::Narrative,
        description: "Blurred, unreal colors.",
        prompt_fragment: "surrealist dream map, floating island districts, soft bokeh clouds, iridescent glowing colors, impossible paths",
        icon: "✨",
    },
];

pub fn all() -> &'static [StyleDescriptor] {
    MAP_STYLES
}

/// First catalog entry; selected when nothing else has been picked.
pub fn default_style() -> &'static StyleDescriptor {
    &MAP_STYLES[0]
}

pub fn find(id: &str) -> Option<&'static StyleDescriptor> {
    MAP_STYLES.iter().find(|style| style.id == id)
}

pub fn in_category(category: StyleCategory) -> impl Iterator<Item = &'static StyleDescriptor> {
    MAP_STYLES
        .iter()
        .filter(move |style| style.category == category)
}
