use std::fs;

use elements::{
    CustomElement, ElementOptions, Error, FileFetcher, HostElement, ResourceMap, TemplateError,
    TemplateState, Window,
};

#[derive(Default)]
struct Card;

impl CustomElement for Card {
    fn on_connected(&mut self, host: &mut HostElement<'_>) -> Result<(), Error> {
        host.stamp_template()?;
        Ok(())
    }
}

const CARD_TEMPLATE: &str = "<div class=\"header\"><slot name=\"title\"></slot></div><slot></slot>";

#[test]
fn template_is_stamped_into_the_shadow_root() {
    let mut window = Window::new(ResourceMap::new().with("card.html", CARD_TEMPLATE));
    let metadata = window
        .register_element::<Card>(
            ElementOptions::new("x-card")
                .shadow_dom(true)
                .template_url("card.html"),
        )
        .unwrap();

    let template = metadata.template.clone().unwrap();
    assert_eq!(template.state(), TemplateState::Pending);
    window.run();
    assert_eq!(template.state(), TemplateState::Ready);

    window
        .load_document("<body><x-card><span slot=\"title\">Hi</span></x-card></body>")
        .unwrap();

    let card = window.dom().find_element(window.document(), "x-card").unwrap();
    let shadow = window.dom().shadow_root(card).unwrap();
    assert_eq!(window.dom().inner_html(shadow), CARD_TEMPLATE);
    assert_eq!(
        window.dom().inner_html(card),
        "<span slot=\"title\">Hi</span>"
    );
}

#[test]
fn reconnecting_keeps_the_stamped_shadow_root() {
    let mut window = Window::new(ResourceMap::new().with("card.html", CARD_TEMPLATE));
    window
        .register_element::<Card>(
            ElementOptions::new("x-card")
                .shadow_dom(true)
                .template_url("card.html"),
        )
        .unwrap();
    window.run();

    let card = window.create_element("x-card").unwrap();
    let document = window.document();
    window.dom_mut().append_child(document, card).unwrap();
    let shadow = window.dom().shadow_root(card).unwrap();
    let stamped = window.dom().children(shadow).to_vec();
    let nodes = window.dom().len();

    for _ in 0..3 {
        window.dom_mut().remove_child(document, card).unwrap();
        window.dom_mut().append_child(document, card).unwrap();
    }

    assert_eq!(window.dom().len(), nodes);
    assert_eq!(window.dom().children(shadow), stamped.as_slice());
    assert_eq!(window.dom().inner_html(shadow), CARD_TEMPLATE);
}

#[test]
fn pending_template_is_not_stamped() {
    let mut window = Window::new(ResourceMap::new().with("card.html", CARD_TEMPLATE));
    window
        .register_element::<Card>(
            ElementOptions::new("x-card")
                .shadow_dom(true)
                .template_url("card.html"),
        )
        .unwrap();

    let card = window.create_element("x-card").unwrap();
    let document = window.document();
    window.dom_mut().append_child(document, card).unwrap();

    let shadow = window.dom().shadow_root(card).unwrap();
    assert!(window.dom().children(shadow).is_empty());
}

#[test]
fn unreachable_template_fails_without_affecting_instances() {
    #[derive(Default)]
    struct Plain;
    impl CustomElement for Plain {}

    let mut window = Window::new(ResourceMap::new());
    let metadata = window
        .register_element::<Plain>(
            ElementOptions::new("x-plain")
                .shadow_dom(true)
                .template_url("missing.html"),
        )
        .unwrap();

    let plain = window.create_element("x-plain").unwrap();
    let document = window.document();
    window.dom_mut().append_child(document, plain).unwrap();
    assert!(window.dom().is_custom(plain));

    window.run();

    let template = metadata.template.clone().unwrap();
    assert_eq!(template.state(), TemplateState::Failed);
    assert!(matches!(
        window.block_on(template.clone()),
        Err(TemplateError::Fetch { .. })
    ));
    // Later consumers observe the same failure.
    let metadata = window.metadata_of(plain).unwrap();
    assert!(matches!(
        metadata.template.as_ref().and_then(|t| t.get()),
        Some(Err(TemplateError::Fetch { .. }))
    ));
}

#[test]
fn failed_template_is_reported_by_stamp() {
    let mut window = Window::new(ResourceMap::new());
    window
        .register_element::<Card>(
            ElementOptions::new("x-card")
                .shadow_dom(true)
                .template_url("missing.html"),
        )
        .unwrap();
    window.run();

    // The connected hook fails; the element itself is still upgraded.
    window
        .load_document("<body><x-card></x-card></body>")
        .unwrap();
    let card = window.dom().find_element(window.document(), "x-card").unwrap();
    assert!(window.dom().is_custom(card));
    assert!(window.dom().children(window.dom().shadow_root(card).unwrap()).is_empty());
}

#[test]
fn templates_load_from_files() {
    let assets = tempfile::tempdir().unwrap();
    fs::create_dir(assets.path().join("templates")).unwrap();
    fs::write(assets.path().join("templates/card.html"), CARD_TEMPLATE).unwrap();
    fs::write(
        assets.path().join("index.html"),
        "<!DOCTYPE html><html><body><x-card></x-card></body></html>",
    )
    .unwrap();

    let mut window = Window::new(FileFetcher::new(assets.path()));
    window
        .register_element::<Card>(
            ElementOptions::new("x-card")
                .shadow_dom(true)
                .template_url("templates/card.html"),
        )
        .unwrap();
    window.run();
    window.load_url("index.html").unwrap();

    let card = window.dom().find_element(window.document(), "x-card").unwrap();
    let shadow = window.dom().shadow_root(card).unwrap();
    assert_eq!(window.dom().inner_html(shadow), CARD_TEMPLATE);
}
