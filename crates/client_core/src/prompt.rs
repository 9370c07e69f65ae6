use shared::domain::StyleDescriptor;

/// Builds the text prompt for one city/style pair. Pure and deterministic.
pub fn compose_map_prompt(city_name: &str, style: &StyleDescriptor) -> String {
    let city = city_name.trim();
    format!(
        "Generate a high-resolution artistic metropolitan road map of the city of {city}. \n  \
         \n  PERSPECTIVE: Perfectly flat orthographic top-down bird's-eye view.\
         \n  VIEW: Metropolitan scale, showing the city footprint including bridges, main arteries, and coastlines.\
         \n  \
         \n  STYLE: The map MUST be rendered strictly in the {name} aesthetic.\
         \n  STYLE DETAILS: {details}.\
         \n  \
         \n  Focus on a beautiful cartographic composition. \
         \n  Keep it 2D top-down, no 3D buildings, no side-view distortion.",
        name = style.name,
        details = style.prompt_fragment,
    )
}
