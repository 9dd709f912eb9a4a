use geo_challenge_core::config::FieldNames;
use geo_challenge_core::CoordinateForm;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlInputElement};

/// The challenge form inputs, looked up once at mount time.
#[derive(Clone)]
pub(crate) struct DomForm {
    pub(crate) latitude: HtmlInputElement,
    pub(crate) longitude: HtmlInputElement,
    pub(crate) tolerance: Option<HtmlInputElement>,
}

impl DomForm {
    pub(crate) fn locate(document: &Document, fields: &FieldNames) -> Result<Self, JsValue> {
        let latitude = input_by_id(document, &fields.latitude_id)?;
        let longitude = input_by_id(document, &fields.longitude_id)?;
        let selector = format!("input[name=\"{}\"]", fields.tolerance_name);
        let tolerance = document
            .query_selector(&selector)?
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok());
        Ok(Self {
            latitude,
            longitude,
            tolerance,
        })
    }
}

fn input_by_id(document: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an input")))
}

impl CoordinateForm for DomForm {
    fn latitude(&self) -> String {
        self.latitude.value()
    }

    fn longitude(&self) -> String {
        self.longitude.value()
    }

    fn tolerance(&self) -> String {
        self.tolerance
            .as_ref()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn set_latitude(&mut self, value: &str) {
        self.latitude.set_value(value);
    }

    fn set_longitude(&mut self, value: &str) {
        self.longitude.set_value(value);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use geo_challenge_core::LatLng;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().and_then(|w| w.document()).unwrap()
    }

    #[wasm_bindgen_test]
    fn reads_and_writes_form_inputs() {
        let doc = document();
        let body = doc.body().unwrap();
        let form = doc.create_element("form").unwrap();
        form.set_inner_html(
            r#"<input id="lat-t1" value="10"><input id="lng-t1" value="20">
               <input name="radius-t1" type="number" value="500">"#,
        );
        body.append_child(&form).unwrap();

        let names = FieldNames {
            latitude_id: "lat-t1".to_string(),
            longitude_id: "lng-t1".to_string(),
            tolerance_name: "radius-t1".to_string(),
        };
        let mut dom = DomForm::locate(&doc, &names).unwrap();
        assert_eq!(dom.latitude(), "10");
        assert_eq!(dom.tolerance(), "500");

        dom.write_position(LatLng { lat: 1.5, lng: -2.25 });
        assert_eq!(dom.latitude.value(), "1.5000000000");
        assert_eq!(dom.longitude.value(), "-2.2500000000");
        form.remove();
    }

    #[wasm_bindgen_test]
    fn missing_coordinate_input_is_an_error() {
        let names = FieldNames {
            latitude_id: "does-not-exist".to_string(),
            ..FieldNames::default()
        };
        assert!(DomForm::locate(&document(), &names).is_err());
    }

    #[wasm_bindgen_test]
    fn missing_tolerance_reads_empty() {
        let doc = document();
        let form = doc.create_element("form").unwrap();
        form.set_inner_html(r#"<input id="lat-t3"><input id="lng-t3">"#);
        doc.body().unwrap().append_child(&form).unwrap();
        let names = FieldNames {
            latitude_id: "lat-t3".to_string(),
            longitude_id: "lng-t3".to_string(),
            tolerance_name: "nope-t3".to_string(),
        };
        let dom = DomForm::locate(&doc, &names).unwrap();
        assert_eq!(dom.tolerance(), "");
        form.remove();
    }
}
