use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use geo_challenge_core::{
    GateStep, GeocodeResult, InitialPosition, LatLng, PositionSync, SyncOutcome, WidgetConfig,
};
use gloo::events::EventListener;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::boot::{self, js_err};
use crate::dom_form::DomForm;
use crate::leaflet::{self, Control, Map};
use crate::leaflet_surface::LeafletSurface;

/// Value given to the `form` attribute of inputs inside map controls. No form
/// carries this id, so the browser leaves those inputs out of submissions.
pub(crate) const DETACHED_FORM_ID: &str = "no-form";

type Widget = PositionSync<LeafletSurface, DomForm>;

struct MountedWidget {
    sync: Rc<RefCell<Widget>>,
    _listeners: Vec<EventListener>,
    _map_handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

thread_local! {
    static PENDING: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
    static MOUNTED: RefCell<HashMap<String, MountedWidget>> = RefCell::new(HashMap::new());
}

pub(crate) fn is_mounted(mount_id: &str) -> bool {
    MOUNTED.with(|slot| slot.borrow().contains_key(mount_id))
}

pub(crate) fn is_pending(mount_id: &str) -> bool {
    PENDING.with(|slot| slot.borrow().contains(mount_id))
}

pub(crate) fn mounted_position(mount_id: &str) -> Option<LatLng> {
    MOUNTED.with(|slot| {
        slot.borrow()
            .get(mount_id)
            .and_then(|widget| widget.sync.try_borrow().ok()?.position())
    })
}

/// Waits for the map library, then mounts. A second call for the same mount
/// point while the first is waiting or after it mounted is a no-op.
pub(crate) fn mount(config: WidgetConfig) {
    let mount_id = config.mount_id.clone();
    if is_mounted(&mount_id) {
        gloo::console::log!("geo map: already mounted", mount_id);
        return;
    }
    let claimed = PENDING.with(|slot| slot.borrow_mut().insert(mount_id.clone()));
    if !claimed {
        gloo::console::log!("geo map: mount already pending", mount_id);
        return;
    }
    spawn_local(async move {
        let step = boot::wait_for_map_library(config.readiness).await;
        PENDING.with(|slot| {
            slot.borrow_mut().remove(&config.mount_id);
        });
        match step {
            GateStep::Fire => {
                if let Err(err) = mount_now(&config) {
                    gloo::console::warn!("geo map: mount failed", config.mount_id.clone(), js_err(err));
                }
            }
            GateStep::GaveUp => {
                gloo::console::warn!(
                    "geo map: map library never loaded",
                    config.mount_id.clone()
                );
            }
            GateStep::Wait | GateStep::Done => {}
        }
    });
}

fn mount_now(config: &WidgetConfig) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let form = DomForm::locate(&document, &config.fields)?;

    let initial = InitialPosition::resolve(config.mode, &form);
    if let InitialPosition::Fallback(_) = initial {
        gloo::console::warn!(
            "geo map: stored coordinates unreadable, using origin",
            form.latitude.value(),
            form.longitude.value()
        );
    }
    let view = config.initial_view(initial.position());

    let map = leaflet::new_map(&config.mount_id)?;
    map.set_view(&leaflet::lat_lng(view.center), view.zoom);

    add_base_layers(&map, config)?;
    let geocoder = leaflet::Control::new_geocoder(&leaflet::options(&[(
        "defaultMarkGeocode",
        JsValue::FALSE,
    )]));
    geocoder.add_to(&map);

    let sync = Rc::new(RefCell::new(PositionSync::new(
        config.mode,
        config.circle.clone(),
        LeafletSurface::new(map.clone()),
        form.clone(),
        initial,
    )));

    let mut map_handlers = Vec::new();

    let on_click = {
        let sync = sync.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let Some((lat, lng)) = leaflet::get(&event, "latlng").and_then(|v| leaflet::read_lat_lng(&v))
            else {
                return;
            };
            with_sync(&sync, "click", |sync| sync.on_map_click(lat, lng));
        })
    };
    map.on("click", on_click.as_ref().unchecked_ref());
    map_handlers.push(on_click);

    let on_geocode = {
        let sync = sync.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let Some(result) = read_geocode(&event) else {
                gloo::console::warn!("geo map: geocode result without center or bbox");
                return;
            };
            with_sync(&sync, "geocode", |sync| sync.on_geocode(result));
        })
    };
    geocoder.on("markgeocode", on_geocode.as_ref().unchecked_ref());
    map_handlers.push(on_geocode);

    let mut listeners = Vec::new();
    for input in [&form.latitude, &form.longitude] {
        let sync = sync.clone();
        listeners.push(EventListener::new(input, "change", move |_| {
            with_sync(&sync, "coordinates", |sync| sync.on_coordinates_edited());
        }));
    }
    if let Some(tolerance) = form.tolerance.as_ref() {
        let sync = sync.clone();
        listeners.push(EventListener::new(tolerance, "change", move |_| {
            if let Ok(mut sync) = sync.try_borrow_mut() {
                sync.on_tolerance_edited();
            }
        }));
    } else {
        gloo::console::log!("geo map: no tolerance input, radius overlay disabled");
    }

    MOUNTED.with(|slot| {
        slot.borrow_mut().insert(
            config.mount_id.clone(),
            MountedWidget {
                sync,
                _listeners: listeners,
                _map_handlers: map_handlers,
            },
        );
    });
    gloo::console::log!("geo map: mounted", config.mount_id.clone());
    Ok(())
}

fn add_base_layers(map: &Map, config: &WidgetConfig) -> Result<(), JsValue> {
    let base_layers = js_sys::Object::new();
    for (index, layer) in config.base_layers.iter().enumerate() {
        let tile_layer = leaflet::new_tile_layer(
            &layer.url_template,
            &leaflet::options(&[
                ("maxZoom", JsValue::from_f64(f64::from(layer.max_zoom))),
                ("attribution", JsValue::from_str(&layer.attribution)),
            ]),
        );
        if index == 0 {
            tile_layer.add_to(map);
        }
        js_sys::Reflect::set(&base_layers, &JsValue::from_str(&layer.name), &tile_layer)?;
    }
    let control = leaflet::new_layers_control(&base_layers);
    control.add_to(map);
    detach_control_inputs(&control);
    Ok(())
}

/// Keeps the layer switcher's radio buttons out of the challenge form.
fn detach_control_inputs(control: &Control) {
    let Some(container) = control.get_container() else {
        return;
    };
    let detached = detach_inputs(&container);
    if detached > 0 {
        gloo::console::log!("geo map: detached layer control inputs", detached);
    }
}

pub(crate) fn detach_inputs(container: &HtmlElement) -> u32 {
    let Ok(inputs) = container.query_selector_all("input") else {
        return 0;
    };
    let mut detached = 0;
    for index in 0..inputs.length() {
        let Some(node) = inputs.item(index) else {
            continue;
        };
        let Ok(input) = node.dyn_into::<web_sys::Element>() else {
            continue;
        };
        if input.set_attribute("form", DETACHED_FORM_ID).is_ok() {
            detached += 1;
        }
    }
    detached
}

fn read_geocode(event: &JsValue) -> Option<GeocodeResult> {
    let geocode = leaflet::get(event, "geocode")?;
    let (lat, lng) = leaflet::read_lat_lng(&leaflet::get(&geocode, "center")?)?;
    let bbox = leaflet::read_bounds(&leaflet::get(&geocode, "bbox")?)?;
    Some(GeocodeResult {
        center: LatLng { lat, lng },
        bbox,
    })
}

fn with_sync<F>(sync: &Rc<RefCell<Widget>>, source: &str, handle: F)
where
    F: FnOnce(&mut Widget) -> SyncOutcome,
{
    let Ok(mut sync) = sync.try_borrow_mut() else {
        gloo::console::warn!("geo map: event dropped (busy)", source);
        return;
    };
    if let SyncOutcome::Ignored(reason) = handle(&mut *sync) {
        gloo::console::log!("geo map: event ignored", source, format!("{reason:?}"));
    }
}
