//! A landing page laid out the way the effects expect.

use vitrine_dom::{ElementId, MemoryPage, Page};

/// Handles into the page built by [`landing_page`].
///
/// Document layout (viewport 1280x800, document 4000 px tall):
///
/// | top  | element |
/// |------|---------|
/// | 0    | `.header` (80) with `.header__menu-toggle` and `.mobile-nav` |
/// | 80   | `.hero__slider` (600), two slides with `.hero__content` |
/// | 300  | `.fade-in` intro, `img[data-src]` hero image |
/// | 900  | `#about` (600) with `.fade-in` and a delayed `.fade-in-left` |
/// | 1600 | `#services` (800) with two `[data-counter]` stats |
/// | 2600 | `img[data-src]` team photo |
/// | 3000 | `form[data-validate]` with name, email and phone fields |
/// | 3600 | footer |
#[derive(Debug, Clone)]
pub struct Landing {
    pub header: ElementId,
    pub menu_toggle: ElementId,
    pub menu_icon: ElementId,
    pub mobile_nav: ElementId,
    pub nav_about: ElementId,
    pub nav_services: ElementId,
    pub hero_slider: ElementId,
    pub slides: [ElementId; 2],
    pub slide_contents: [ElementId; 2],
    pub intro_fade: ElementId,
    pub hero_image: ElementId,
    pub about: ElementId,
    pub about_fade: ElementId,
    pub delayed_fade: ElementId,
    pub services: ElementId,
    pub patients_counter: ElementId,
    pub doctors_counter: ElementId,
    pub team_image: ElementId,
    pub contact_form: ElementId,
    pub name_input: ElementId,
    pub email_input: ElementId,
    pub phone_input: ElementId,
    pub submit_button: ElementId,
    pub footer: ElementId,
    pub footer_top_link: ElementId,
}

/// Build the landing page fixture.
pub fn landing_page() -> (MemoryPage, Landing) {
    let mut page = MemoryPage::new()
        .with_viewport(1280.0, 800.0)
        .with_document_height(4000.0);
    let body = page.body().expect("memory pages always have a body");

    let header = page.spawn(body, "header").class("header").layout(0.0, 80.0).finish();
    let menu_toggle = page
        .spawn(header, "button")
        .class("header__menu-toggle")
        .layout(20.0, 40.0)
        .finish();
    let menu_icon = page.spawn(menu_toggle, "span").class("bar").finish();
    let mobile_nav = page.spawn(header, "nav").class("mobile-nav").finish();
    let list = page.spawn(mobile_nav, "ul").finish();
    let item = page.spawn(list, "li").finish();
    let nav_about = page.spawn(item, "a").attr("href", "#about").text("About").finish();
    let item = page.spawn(list, "li").finish();
    let nav_services = page
        .spawn(item, "a")
        .attr("href", "#services")
        .text("Services")
        .finish();

    let hero_slider = page
        .spawn(body, "section")
        .class("hero__slider")
        .layout(80.0, 600.0)
        .finish();
    let mut slides = [ElementId::new(0); 2];
    let mut slide_contents = [ElementId::new(0); 2];
    for i in 0..2 {
        slides[i] = page.spawn(hero_slider, "div").class("slide").layout(80.0, 600.0).finish();
        slide_contents[i] = page
            .spawn(slides[i], "div")
            .class("hero__content")
            .layout(280.0, 200.0)
            .finish();
    }

    let intro_fade = page.spawn(body, "p").class("fade-in").layout(300.0, 60.0).finish();
    let hero_image = page
        .spawn(body, "img")
        .attr("src", "placeholder.gif")
        .attr("data-src", "img/hero.jpg")
        .layout(400.0, 200.0)
        .finish();

    let about = page
        .spawn(body, "section")
        .attr("id", "about")
        .layout(900.0, 600.0)
        .finish();
    let about_fade = page
        .spawn(about, "div")
        .class("fade-in")
        .layout(950.0, 100.0)
        .finish();
    let delayed_fade = page
        .spawn(about, "div")
        .class("fade-in-left")
        .attr("data-delay", "200")
        .layout(1100.0, 100.0)
        .finish();

    let services = page
        .spawn(body, "section")
        .attr("id", "services")
        .layout(1600.0, 800.0)
        .finish();
    let patients_counter = page
        .spawn(services, "span")
        .attr("data-counter", "1000")
        .text("0")
        .layout(1700.0, 40.0)
        .finish();
    let doctors_counter = page
        .spawn(services, "span")
        .attr("data-counter", "100")
        .attr("data-duration", "16")
        .text("0")
        .layout(1760.0, 40.0)
        .finish();

    let team_image = page
        .spawn(body, "img")
        .attr("src", "placeholder.gif")
        .attr("data-src", "img/team.jpg")
        .layout(2600.0, 300.0)
        .finish();

    let contact_form = page
        .spawn(body, "form")
        .attr("data-validate", "")
        .layout(3000.0, 500.0)
        .finish();
    let name_input = page
        .spawn(contact_form, "input")
        .attr("name", "name")
        .attr("required", "")
        .finish();
    let email_input = page
        .spawn(contact_form, "input")
        .attr("name", "email")
        .attr("type", "email")
        .attr("required", "")
        .finish();
    let phone_input = page
        .spawn(contact_form, "input")
        .attr("name", "phone")
        .attr("type", "tel")
        .finish();
    let submit_button = page
        .spawn(contact_form, "button")
        .attr("type", "submit")
        .finish();

    let footer = page.spawn(body, "footer").layout(3600.0, 400.0).finish();
    let footer_top_link = page.spawn(footer, "a").attr("href", "#").text("Top").finish();

    let landing = Landing {
        header,
        menu_toggle,
        menu_icon,
        mobile_nav,
        nav_about,
        nav_services,
        hero_slider,
        slides,
        slide_contents,
        intro_fade,
        hero_image,
        about,
        about_fade,
        delayed_fade,
        services,
        patients_counter,
        doctors_counter,
        team_image,
        contact_form,
        name_input,
        email_input,
        phone_input,
        submit_button,
        footer,
        footer_top_link,
    };
    (page, landing)
}
