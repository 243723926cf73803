//! One-shot `navigator.geolocation` lookup.

use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{GeolocationPosition, GeolocationPositionError};

/// `(latitude, longitude)` of the device, or the browser's error message.
pub async fn current_position() -> Result<(f64, f64), String> {
    let geolocation = web_sys::window()
        .ok_or_else(|| "Geolocation is not supported by this browser".to_string())?
        .navigator()
        .geolocation()
        .map_err(|_| "Geolocation is not supported by this browser".to_string())?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let fail = reject.clone();
        let on_ok = Closure::once_into_js(move |pos: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &pos);
        });
        let on_err = Closure::once_into_js(move |err: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &err);
        });
        if let Err(e) = geolocation
            .get_current_position_with_error_callback(on_ok.unchecked_ref(), Some(on_err.unchecked_ref()))
        {
            let _ = fail.call1(&JsValue::NULL, &e);
        }
    });

    let value = JsFuture::from(promise).await.map_err(|e| {
        e.dyn_ref::<GeolocationPositionError>()
            .map(|err| err.message())
            .unwrap_or_else(|| "Unable to retrieve your location".to_string())
    })?;

    let position: GeolocationPosition = value
        .dyn_into()
        .map_err(|_| "Unable to retrieve your location".to_string())?;
    let coords = position.coords();
    Ok((coords.latitude(), coords.longitude()))
}
