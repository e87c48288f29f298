//! WASM browser tests for atelier-editor-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use std::cell::Cell;
use std::rc::Rc;

use atelier_editor_browser::{
    ColorChoice, ColorRole, EditableContent, EditorSession, allows_native_menu, apply_color_class,
    clean_html_for_export, export_document, get_current_colors, mark_design_containers,
    resolve_target, session::COLOR_UPDATE_SETTLE_MS,
};
use atelier_editor_core::{Design, markers};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

fn document() -> web_sys::Document {
    gloo_utils::document()
}

/// Mount markup into a fresh body-level div and return it.
fn mount(html: &str) -> Element {
    let root = document().create_element("div").unwrap();
    root.set_inner_html(html);
    gloo_utils::body().append_child(&root).unwrap();
    root
}

fn unmount(root: &Element) {
    root.remove();
}

fn choice(class: &str) -> ColorChoice {
    ColorChoice::from_token(class)
}

// === Color apply/read tests ===

#[wasm_bindgen_test]
fn test_apply_then_read_round_trip() {
    let root = mount(r#"<div class="p-4"></div>"#);
    let el = root.query_selector("div").unwrap().unwrap();

    apply_color_class(&el, &choice("text-red-500"), ColorRole::Text);
    apply_color_class(&el, &choice("bg-blue-100"), ColorRole::Bg);

    let colors = get_current_colors(&el);
    assert_eq!(colors.class_for(ColorRole::Text).as_deref(), Some("text-red-500"));
    assert_eq!(colors.class_for(ColorRole::Bg).as_deref(), Some("bg-blue-100"));
    assert_eq!(colors.class_for(ColorRole::Border), None);
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_apply_replaces_same_role() {
    let root = mount(r#"<div class="text-red-500 font-bold"></div>"#);
    let el = root.query_selector("div").unwrap().unwrap();

    apply_color_class(&el, &choice("text-green-700"), ColorRole::Text);

    let class = el.get_attribute("class").unwrap();
    assert!(!class.contains("text-red-500"));
    assert!(class.contains("text-green-700"));
    assert!(class.contains("font-bold"));
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_apply_opacity_variant_replaces_base() {
    let root = mount(r#"<div class="bg-blue-500"></div>"#);
    let el = root.query_selector("div").unwrap().unwrap();

    apply_color_class(&el, &choice("bg-blue-500/40"), ColorRole::Bg);

    let class = el.get_attribute("class").unwrap();
    assert!(!class.split_whitespace().any(|t| t == "bg-blue-500"));
    assert!(class.contains("bg-blue-500/40"));
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_apply_none_clears_role() {
    let root = mount(r#"<div class="bg-amber-200/50 text-black"></div>"#);
    let el = root.query_selector("div").unwrap().unwrap();

    apply_color_class(&el, &ColorChoice::Clear, ColorRole::Bg);

    let colors = get_current_colors(&el);
    assert_eq!(colors.class_for(ColorRole::Bg), None);
    assert_eq!(colors.class_for(ColorRole::Text).as_deref(), Some("text-black"));
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_border_color_adds_border_width() {
    let root = mount(r#"<div class="p-2"></div>"#);
    let el = root.query_selector("div").unwrap().unwrap();

    apply_color_class(&el, &choice("border-rose-400"), ColorRole::Border);

    let class = el.get_attribute("class").unwrap();
    assert!(class.split_whitespace().any(|t| t == "border"));
    assert!(class.contains("border-rose-400"));
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_border_color_keeps_existing_width() {
    let root = mount(r#"<div class="border-2 border-red-500"></div>"#);
    let el = root.query_selector("div").unwrap().unwrap();

    apply_color_class(&el, &choice("border-sky-300"), ColorRole::Border);

    let class = el.get_attribute("class").unwrap();
    assert!(class.contains("border-2"));
    assert!(!class.split_whitespace().any(|t| t == "border"));
    assert!(class.contains("border-sky-300"));
    unmount(&root);
}

// === Target resolution tests ===

#[wasm_bindgen_test]
fn test_resolve_target_retargets_bare_text() {
    let root = mount(r#"<div id="card" class="p-4"><p id="para">hi</p></div>"#);
    let card = root.query_selector("#card").unwrap().unwrap();
    let para = root.query_selector("#para").unwrap().unwrap();

    let resolved = resolve_target(&root, &para).unwrap();
    assert_eq!(resolved, card);
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_resolve_target_keeps_colorable_element() {
    let root = mount(r#"<section id="hero"><div id="inner"></div></section>"#);
    let inner = root.query_selector("#inner").unwrap().unwrap();

    let resolved = resolve_target(&root, &inner).unwrap();
    assert_eq!(resolved, inner);
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_resolve_target_outside_container_is_none() {
    let container = mount(r#"<div></div>"#);
    let outside = mount(r#"<div id="elsewhere"></div>"#);
    let el = outside.query_selector("#elsewhere").unwrap().unwrap();

    assert!(resolve_target(&container, &el).is_none());
    unmount(&container);
    unmount(&outside);
}

// === Instrumentation tests ===

fn sample_design() -> &'static str {
    r#"
    <h1>Title</h1>
    <p>Some copy</p>
    <div>leaf text</div>
    <div><span>nested</span></div>
    <button style="cursor: pointer;">Buy now</button>
    "#
}

#[wasm_bindgen_test]
fn test_instrument_marks_text_editable() {
    let root = mount(sample_design());
    let session = EditorSession::new();
    let mut content = EditableContent::new(root.clone(), session);

    content.instrument();
    assert!(content.is_instrumented());

    let h1 = root.query_selector("h1").unwrap().unwrap();
    assert_eq!(h1.get_attribute("contenteditable").as_deref(), Some("true"));
    let span = root.query_selector("span").unwrap().unwrap();
    assert_eq!(span.get_attribute("contenteditable").as_deref(), Some("true"));
    // Structural div stays uneditable.
    let structural = root.query_selector("div > span").unwrap().unwrap();
    let parent = structural.parent_element().unwrap();
    assert!(!parent.has_attribute("contenteditable"));
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_instrument_neutralizes_interactive() {
    let root = mount(sample_design());
    let session = EditorSession::new();
    let mut content = EditableContent::new(root.clone(), session);

    content.instrument();

    let button = root
        .query_selector("button")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    assert_eq!(button.style().get_property_value("pointer-events").unwrap(), "none");
    assert_eq!(button.style().get_property_value("cursor").unwrap(), "text");
    assert_eq!(
        button.get_attribute(markers::ORIGINAL_CURSOR).as_deref(),
        Some("pointer")
    );
    assert_eq!(
        button.get_attribute(markers::ORIGINAL_TEXT).as_deref(),
        Some("Buy now")
    );
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_instrument_is_idempotent() {
    let root = mount(sample_design());
    let session = EditorSession::new();
    let mut content = EditableContent::new(root.clone(), session);

    content.instrument();
    let guards = content.guard_count();
    content.refresh();
    assert_eq!(content.guard_count(), guards);
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_teardown_restores_markup_exactly() {
    let root = mount(sample_design());
    let before = root.inner_html();

    let session = EditorSession::new();
    let mut content = EditableContent::new(root.clone(), session);
    content.instrument();
    assert_ne!(root.inner_html(), before);

    content.teardown();
    assert_eq!(root.inner_html(), before);
    assert!(!root.has_attribute(markers::MOUSE_TRACKING));
    assert!(!root.has_attribute(markers::SELECTION_ENABLED));
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_teardown_without_instrument_is_noop() {
    let root = mount(sample_design());
    let before = root.inner_html();

    let session = EditorSession::new();
    let mut content = EditableContent::new(root.clone(), session);
    content.teardown();
    assert_eq!(root.inner_html(), before);
    unmount(&root);
}

fn mouse_event(kind: &str, button: i16) -> web_sys::MouseEvent {
    let init = web_sys::MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_button(button);
    web_sys::MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

#[wasm_bindgen_test]
fn test_right_mousedown_on_editable_is_suppressed() {
    let root = mount(r#"<p id="copy">text</p>"#);
    let session = EditorSession::new();
    let mut content = EditableContent::new(root.clone(), session.clone());
    content.instrument();

    let p = root.query_selector("#copy").unwrap().unwrap();

    // Right button: the capture guard cancels the event, and the
    // document-level tracking records the held button.
    let proceeded = p.dispatch_event(&mouse_event("mousedown", 2)).unwrap();
    assert!(!proceeded);
    assert!(session.right_mouse_down());

    p.dispatch_event(&mouse_event("mouseup", 2)).unwrap();
    assert!(!session.right_mouse_down());

    // Left button passes through untouched.
    let proceeded = p.dispatch_event(&mouse_event("mousedown", 0)).unwrap();
    assert!(proceeded);
    assert!(!session.right_mouse_down());
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_focus_redirected_while_right_button_held() {
    let root = mount(r#"<p id="copy">text</p>"#);
    let session = EditorSession::new();
    let mut content = EditableContent::new(root.clone(), session.clone());
    content.instrument();

    let p = root.query_selector("#copy").unwrap().unwrap();
    let target = p.clone().dyn_into::<HtmlElement>().unwrap();

    // While the right button is held the focus guard blurs the element
    // and redirects focus, so contenteditable cannot steal it.
    p.dispatch_event(&mouse_event("mousedown", 2)).unwrap();
    target.focus().unwrap();
    assert_ne!(document().active_element().unwrap(), p);

    // Released: focus lands normally again.
    p.dispatch_event(&mouse_event("mouseup", 2)).unwrap();
    target.focus().unwrap();
    assert_eq!(document().active_element().unwrap(), p);
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_native_menu_allowed_in_focused_editable() {
    let root = mount(r#"<p id="edit">text</p>"#);
    let p = root
        .query_selector("#edit")
        .unwrap()
        .unwrap();
    p.set_attribute("contenteditable", "true").unwrap();
    p.set_attribute("tabindex", "0").unwrap();

    assert!(!allows_native_menu(&p));
    p.clone().dyn_into::<HtmlElement>().unwrap().focus().unwrap();
    assert!(allows_native_menu(&p));
    unmount(&root);
}

// === Session tests ===

#[wasm_bindgen_test]
fn test_update_color_without_selection_is_noop() {
    let session = EditorSession::new();
    let fired = Rc::new(Cell::new(0u32));
    let counter = fired.clone();
    session.on_update(move |_| counter.set(counter.get() + 1));

    session.update_color(&choice("text-red-500"), ColorRole::Text);
    assert_eq!(fired.get(), 0);
}

#[wasm_bindgen_test]
fn test_selecting_new_element_supersedes_highlight() {
    let root = mount(r#"<div id="a">one</div><div id="b">two</div>"#);
    let a = root.query_selector("#a").unwrap().unwrap();
    let b = root.query_selector("#b").unwrap().unwrap();

    let session = EditorSession::new();
    session.select_in_container(&a, root.clone());
    assert!(a.has_attribute(markers::COLOR_EDITING));

    session.select_in_container(&b, root.clone());
    assert!(!a.has_attribute(markers::COLOR_EDITING));
    assert!(!a.get_attribute("style").is_some_and(|s| s.contains("dashed")));
    assert!(b.has_attribute(markers::COLOR_EDITING));
    session.close_picker();
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_close_picker_removes_highlight_and_notifies() {
    let root = mount(r#"<div id="a" style="outline: 1px solid red">one</div>"#);
    let a = root.query_selector("#a").unwrap().unwrap();

    let session = EditorSession::new();
    let fired = Rc::new(Cell::new(0u32));
    let counter = fired.clone();
    session.on_update(move |_| counter.set(counter.get() + 1));

    session.select_in_container(&a, root.clone());
    session.close_picker();

    assert_eq!(fired.get(), 1);
    assert!(!a.has_attribute(markers::COLOR_EDITING));
    // The pre-existing outline survives, the highlight does not.
    let style = a.get_attribute("style").unwrap_or_default();
    assert!(style.contains("solid"));
    assert!(!style.contains("dashed"));
    unmount(&root);
}

#[wasm_bindgen_test]
async fn test_update_color_notifies_after_settle() {
    let root = mount(r#"<div id="a">one</div>"#);
    let a = root.query_selector("#a").unwrap().unwrap();

    let session = EditorSession::new();
    let fired = Rc::new(Cell::new(0u32));
    let counter = fired.clone();
    session.on_update(move |_| counter.set(counter.get() + 1));

    session.select_in_container(&a, root.clone());
    session.update_color(&choice("bg-teal-200"), ColorRole::Bg);
    session.update_color(&choice("text-white"), ColorRole::Text);
    assert_eq!(fired.get(), 0);

    TimeoutFuture::new(COLOR_UPDATE_SETTLE_MS + 20).await;
    // Back-to-back updates coalesce into one notification.
    assert_eq!(fired.get(), 1);
    assert!(a.get_attribute("class").unwrap().contains("bg-teal-200"));

    session.close_picker();
    unmount(&root);
}

// === Export tests ===

#[wasm_bindgen_test]
fn test_clean_html_strips_instrumentation() {
    let root = mount(sample_design());
    let session = EditorSession::new();
    let mut content = EditableContent::new(root.clone(), session);
    content.instrument();

    let cleaned = clean_html_for_export(&root.inner_html());
    assert!(!cleaned.contains("contenteditable"));
    assert!(!cleaned.contains("data-original"));
    assert!(!cleaned.contains("pointer-events"));
    assert!(!cleaned.contains("cursor: text"));
    // Content itself survives.
    assert!(cleaned.contains("Buy now"));
    assert!(cleaned.contains("<h1>Title</h1>"));
    unmount(&root);
}

#[wasm_bindgen_test]
fn test_export_document_omits_unassigned_slots() {
    let design = Design {
        id: 1,
        doc_id: None,
        name: "About v2".into(),
        active: true,
        html: "<p>About us</p>".to_string(),
    };
    let slots = vec![
        ("Hero".to_string(), None),
        ("About".to_string(), Some(design)),
    ];

    let doc = export_document("My Site", &slots);
    assert_eq!(doc.matches("<section").count(), 1);
    assert!(doc.contains(r#"id="about""#));
    assert!(doc.contains("<!-- About Section -->"));
    assert!(!doc.contains("Hero"));
    assert!(doc.contains("<title>My Site</title>"));
}

#[wasm_bindgen_test]
fn test_mark_design_containers() {
    let root = mount(r#"<div class="design-root"><p contenteditable="false">x</p></div>"#);

    mark_design_containers(".design-root");

    let container = root.query_selector(".design-root").unwrap().unwrap();
    assert_eq!(
        container.get_attribute(markers::DESIGN_CONTAINER).as_deref(),
        Some("true")
    );
    let p = container.query_selector("p").unwrap().unwrap();
    assert_eq!(p.get_attribute("contenteditable").as_deref(), Some("true"));
    unmount(&root);
}
