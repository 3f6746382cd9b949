//! Renders a [`MockupConfiguration`] into the single instruction string sent to
//! the image model.

use crate::mockup::MockupConfiguration;

const IMAGE_PATTERN_CLAUSE: &str = "The hero wall is fully covered in a beautiful wallpaper. \
The precise pattern for the wallpaper is provided in the input image. \
Apply this pattern realistically and seamlessly to the entire hero wall, \
paying close attention to correct scale, texture, and lighting.";

pub fn wallpaper_clause(description: &str, has_image: bool) -> String {
    if has_image {
        return IMAGE_PATTERN_CLAUSE.to_string();
    }
    format!(
        "The hero wall is fully covered in a beautiful wallpaper. \
         The wallpaper is described as: **\"{description}\"**. \
         The pattern scale is realistic and the colors are true-to-life."
    )
}

pub fn subject_clause(config: &MockupConfiguration) -> String {
    let persona = &config.persona;
    let subject = &config.subject;
    format!(
        "
        **Subject:**
        The scene includes: {identity}.
        Their vibe is {vibe}.
        They have {appearance} and are dressed in {outfit}.
        Their activity is natural and relaxed: {activity}.
        Their pose is {pose} and their expression is {expression}.
        The ethnicity of the person or people should be varied if generating multiple images, reflecting a diverse American background.
        ",
        identity = persona.identity,
        vibe = persona.vibe,
        appearance = persona.appearance,
        outfit = subject.outfit,
        activity = subject.activity,
        pose = subject.pose,
        expression = subject.expression,
    )
}

pub fn compile(config: &MockupConfiguration, description: &str, has_image: bool) -> String {
    let room = &config.room;
    let lighting = &config.lighting;
    let camera = &config.camera;

    let prompt = format!(
        "
        **Primary Goal:** A {output_style} of a {room_type} in a {location}, showcasing a feature wall with a new wallpaper. The mood is {emotion}.

        **Scene Description:**
        The image captures a realistic {room_type} with {room_style} decor. The main focal point is the hero wall, located {hero_wall}.
        {wallpaper}

        {subject}

        **Environment & Lighting:**
        The room is illuminated by {light_type} from a {light_source}, creating a {light_mood} atmosphere.
        The space is {clutter}, with furniture like a {furniture}.

        **Camera & Composition:**
        - **Shot Type:** {angle}.
        - **Aspect Ratio:** {framing}.
        - **Focus:** Sharp focus on both the subject(s) and the wallpaper.
        - **Rules:** The wallpaper wall must be the hero, occupying significant frame space without distortion.

        **Crucial Directives & Prohibitions:**
        - **MUST BE PHOTOREALISTIC.** Looks like a real photo from an interior design magazine.
        - **NO:** {prohibitions}.
        - Wallpaper must be perfectly aligned, straight, and artifact-free.
        - The subject(s) should not obscure more than 20-30% of the wallpaper.
        ",
        output_style = config.output.style,
        room_type = room.kind,
        location = room.location_flavor,
        emotion = config.narrative_intent.emotion,
        room_style = room.style,
        hero_wall = room.hero_wall.position,
        wallpaper = wallpaper_clause(description, has_image),
        subject = subject_clause(config),
        light_type = lighting.kind,
        light_source = lighting.source,
        light_mood = lighting.mood,
        clutter = room.clutter_level,
        furniture = room.furniture,
        angle = camera.angle,
        framing = camera.framing,
        prohibitions = config.fx.prohibitions.join(", "),
    );

    normalize_whitespace(&prompt)
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Description the form pre-fills when a pattern file is chosen without any text.
pub fn default_description_for_file(file_name: &str) -> String {
    format!("Custom pattern from uploaded file: {file_name}")
}
