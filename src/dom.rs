use crate::constants::*;
use crate::core::character::{CharacterSpec, EyeKind};
use crate::core::compositor::{CharacterFrame, RigFrame};
use crate::core::config::Transition;
use crate::core::gaze::Rect;
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
fn px(v: f32) -> String {
    format!("{}px", v)
}

fn create_div(document: &web::Document, class: &str) -> anyhow::Result<web::HtmlElement> {
    let el = document
        .create_element("div")
        .map_err(|e| anyhow!("create div: {:?}", e))?;
    el.set_class_name(class);
    el.dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("not an HtmlElement: {:?}", e))
}

fn set_styles(el: &web::HtmlElement, props: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in props {
        _ = style.set_property(name, value);
    }
}

fn append(parent: &web::Node, child: &web::HtmlElement) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow!("append: {:?}", e))
}

/// Viewport rectangle of an element, if it has been laid out.
pub fn measure(el: &web::Element) -> Option<Rect> {
    let r = el.get_bounding_client_rect();
    Some(Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    ))
    .filter(Rect::is_measurable)
}

struct CharacterElements {
    body: web::HtmlElement,
    socket: web::HtmlElement,
    eyes: [web::HtmlElement; 2],
    // Inner pupil of an eyeball; bare pupils move the eye element itself.
    pupils: [Option<web::HtmlElement>; 2],
    mouth: Option<web::HtmlElement>,
}

/// The generated character elements inside the host stage.
pub struct Stage {
    characters: Vec<CharacterElements>,
}

impl Stage {
    pub fn build(
        document: &web::Document,
        root: &web::Element,
        cast: &[CharacterSpec; 4],
        transition: &Transition,
    ) -> anyhow::Result<Self> {
        let transition_css = transition.css();
        let characters = cast
            .iter()
            .map(|spec| build_character(document, root, spec, &transition_css))
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!("[dom] built {} characters", characters.len());
        Ok(Self { characters })
    }

    pub fn bodies(&self) -> [Option<Rect>; 4] {
        std::array::from_fn(|i| measure(&self.characters[i].body))
    }

    pub fn eyes(&self) -> [[Option<Rect>; 2]; 4] {
        std::array::from_fn(|i| {
            let eyes = &self.characters[i].eyes;
            [measure(&eyes[0]), measure(&eyes[1])]
        })
    }

    pub fn apply(&self, frame: &RigFrame) {
        for (els, cf) in self.characters.iter().zip(frame.characters.iter()) {
            apply_character(els, cf);
        }
    }

    pub fn remove(&self) {
        for els in &self.characters {
            els.body.remove();
        }
    }
}

fn build_character(
    document: &web::Document,
    root: &web::Element,
    spec: &CharacterSpec,
    transition_css: &str,
) -> anyhow::Result<CharacterElements> {
    let body = create_div(document, BODY_CLASS)?;
    _ = body.set_attribute(CHARACTER_ATTR, spec.character.name());
    set_styles(
        &body,
        &[
            ("position", "absolute"),
            ("bottom", "0"),
            ("left", px(spec.left).as_str()),
            ("width", px(spec.width).as_str()),
            ("height", px(spec.height).as_str()),
            ("background-color", spec.color),
            ("border-radius", spec.border_radius),
            ("z-index", spec.z_index.to_string().as_str()),
            ("transform-origin", "bottom center"),
            ("transition", transition_css),
        ],
    );

    let socket = create_div(document, "rig-socket")?;
    set_styles(
        &socket,
        &[
            ("position", "absolute"),
            ("display", "flex"),
            ("gap", px(spec.eyes.gap).as_str()),
            ("left", px(spec.socket.tracking.x).as_str()),
            ("top", px(spec.socket.tracking.y).as_str()),
            ("transition", transition_css),
        ],
    );
    append(&body, &socket)?;

    let mut eyes = Vec::with_capacity(2);
    let mut pupils = Vec::with_capacity(2);
    for _ in 0..2 {
        let (eye, pupil) = build_eye(document, spec)?;
        append(&socket, &eye)?;
        eyes.push(eye);
        pupils.push(pupil);
    }

    let mouth = match spec.mouth {
        Some(placement) => {
            let mouth = create_div(document, "rig-mouth")?;
            set_styles(
                &mouth,
                &[
                    ("position", "absolute"),
                    ("left", px(placement.tracking.x).as_str()),
                    ("top", px(placement.tracking.y).as_str()),
                    ("width", px(MOUTH_WIDTH_PX).as_str()),
                    ("height", px(MOUTH_HEIGHT_PX).as_str()),
                    ("border-radius", "9999px"),
                    ("background-color", MOUTH_COLOR),
                    ("transition", transition_css),
                ],
            );
            append(&body, &mouth)?;
            Some(mouth)
        }
        None => None,
    };

    append(root, &body)?;

    let eyes: [web::HtmlElement; 2] = eyes
        .try_into()
        .map_err(|_| anyhow!("expected two eyes"))?;
    let pupils: [Option<web::HtmlElement>; 2] = pupils
        .try_into()
        .map_err(|_| anyhow!("expected two pupils"))?;
    Ok(CharacterElements {
        body,
        socket,
        eyes,
        pupils,
        mouth,
    })
}

fn build_eye(
    document: &web::Document,
    spec: &CharacterSpec,
) -> anyhow::Result<(web::HtmlElement, Option<web::HtmlElement>)> {
    let e = &spec.eyes;
    match e.kind {
        EyeKind::Eyeball { sclera } => {
            let eye = create_div(document, EYE_CLASS)?;
            set_styles(
                &eye,
                &[
                    ("width", px(e.size).as_str()),
                    ("height", px(e.size).as_str()),
                    ("border-radius", "50%"),
                    ("background-color", sclera),
                    ("display", "flex"),
                    ("align-items", "center"),
                    ("justify-content", "center"),
                    ("overflow", "hidden"),
                    ("transition", EYE_TRANSITION_CSS),
                ],
            );
            let pupil = create_div(document, PUPIL_CLASS)?;
            set_styles(
                &pupil,
                &[
                    ("width", px(e.pupil_size).as_str()),
                    ("height", px(e.pupil_size).as_str()),
                    ("border-radius", "50%"),
                    ("background-color", e.pupil_color),
                    ("transition", PUPIL_TRANSITION_CSS),
                ],
            );
            append(&eye, &pupil)?;
            Ok((eye, Some(pupil)))
        }
        EyeKind::Pupil => {
            let eye = create_div(document, PUPIL_CLASS)?;
            set_styles(
                &eye,
                &[
                    ("width", px(e.pupil_size).as_str()),
                    ("height", px(e.pupil_size).as_str()),
                    ("border-radius", "50%"),
                    ("background-color", e.pupil_color),
                    ("transition", PUPIL_TRANSITION_CSS),
                ],
            );
            Ok((eye, None))
        }
    }
}

fn translate(v: glam::Vec2) -> String {
    format!("translate({}px, {}px)", v.x, v.y)
}

fn apply_character(els: &CharacterElements, cf: &CharacterFrame) {
    set_styles(
        &els.body,
        &[("transform", cf.body.css().as_str()), ("height", px(cf.height).as_str())],
    );
    set_styles(
        &els.socket,
        &[("left", px(cf.socket.x).as_str()), ("top", px(cf.socket.y).as_str())],
    );
    for ((eye, pupil), state) in els.eyes.iter().zip(els.pupils.iter()).zip(cf.eyes.iter()) {
        match pupil {
            Some(pupil) => {
                set_styles(eye, &[("height", px(state.height).as_str())]);
                set_styles(
                    pupil,
                    &[
                        ("display", if state.open { "block" } else { "none" }),
                        ("transform", translate(state.pupil).as_str()),
                    ],
                );
            }
            None => set_styles(eye, &[("transform", translate(state.pupil).as_str())]),
        }
    }
    if let (Some(mouth), Some(pos)) = (&els.mouth, cf.mouth) {
        set_styles(mouth, &[("left", px(pos.x).as_str()), ("top", px(pos.y).as_str())]);
    }
}
