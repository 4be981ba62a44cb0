//! C-ABI wrapper around `pet-core`.
//!
//! # Overview
//! Exposes the pet store client through `extern "C"` functions so a
//! presentation layer written in any language with a C FFI can build and
//! parse HTTP requests/responses without linking to serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiPetResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `pet_free_*` function to release them.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use pet_core::{HttpResponse, Pet, PetClient};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `PetClient` for `<base_url>/<resource>`.
///
/// Returns null if either argument is null or if an internal panic occurs.
/// The caller must free the returned pointer with `pet_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn pet_client_new(
    base_url: *const c_char,
    resource: *const c_char,
) -> *mut FfiPetClient {
    catch_unwind(|| {
        if base_url.is_null() || resource.is_null() {
            return std::ptr::null_mut();
        }
        let (url, resource) = unsafe { (read_str(base_url), read_str(resource)) };
        let client = PetClient::new(&url, &resource);
        Box::into_raw(Box::new(FfiPetClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `PetClient` created by `pet_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pet_client_free(client: *mut FfiPetClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build an HTTP request for listing all pets.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `pet_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn pet_build_list_pets(client: *const FfiPetClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_pets())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for fetching a single pet by id.
#[unsafe(no_mangle)]
pub extern "C" fn pet_build_get_pet(client: *const FfiPetClient, id: i64) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_get_pet(id))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for creating a pet. Any id on `pet` is not sent.
///
/// Returns null if `client` or `pet` is null, or if serialization fails.
#[unsafe(no_mangle)]
pub extern "C" fn pet_build_create_pet(
    client: *const FfiPetClient,
    pet: *const FfiPetInput,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || pet.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let draft = unsafe { (*pet).to_core() };
        match client.inner.build_create_pet(&draft) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request creating `len` pets from the array at `pets`.
///
/// Returns null if `client` is null, or if `pets` is null while `len > 0`.
#[unsafe(no_mangle)]
pub extern "C" fn pet_build_bulk_create_pets(
    client: *const FfiPetClient,
    pets: *const FfiPetInput,
    len: u32,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || (pets.is_null() && len > 0) {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let drafts: Vec<Pet> = if len == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(pets, len as usize) }
                .iter()
                .map(|input| unsafe { input.to_core() })
                .collect()
        };
        match client.inner.build_bulk_create_pets(&drafts) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request replacing the pet identified by `pet->id`.
///
/// Returns null if `client` or `pet` is null, or if `pet->has_id` is false.
#[unsafe(no_mangle)]
pub extern "C" fn pet_build_update_pet(
    client: *const FfiPetClient,
    pet: *const FfiPetInput,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || pet.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let record = unsafe { (*pet).to_core() };
        match client.inner.build_update_pet(&record) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for deleting a pet by id.
#[unsafe(no_mangle)]
pub extern "C" fn pet_build_delete_pet(
    client: *const FfiPetClient,
    id: i64,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_delete_pet(id))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a server-side keyword search request.
///
/// Returns null if `client` or `keyword` is null.
#[unsafe(no_mangle)]
pub extern "C" fn pet_build_search_pets(
    client: *const FfiPetClient,
    keyword: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || keyword.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let keyword = unsafe { read_str(keyword) };
        FfiHttpRequest::from_core(client.inner.build_search_pets(&keyword))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a request for pets priced at or below `max_price`.
#[unsafe(no_mangle)]
pub extern "C" fn pet_build_search_by_price(
    client: *const FfiPetClient,
    max_price: f64,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_search_by_price(max_price))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    HttpResponse::new(resp.status, unsafe { read_str(resp.body) })
}

/// Shared null checks and panic guard for every `pet_parse_*` function.
fn parse_with(
    op: &str,
    client: *const FfiPetClient,
    response: *const FfiHttpResponse,
    parse: fn(&PetClient, HttpResponse) -> *mut FfiPetResult,
) -> *mut FfiPetResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiPetResult::null_arg("client");
        }
        if response.is_null() {
            return FfiPetResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        parse(&client.inner, ffi_response_to_core(resp))
    })
    .unwrap_or_else(|_| FfiPetResult::panic(&format!("panic in {op}")))
}

/// Parse an HTTP response from a list-pets request.
///
/// Returns a result with `data_tag = PetList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn pet_parse_list_pets(
    client: *const FfiPetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPetResult {
    parse_with("pet_parse_list_pets", client, response, |c, r| {
        FfiPetResult::from_list(c.parse_list_pets(r))
    })
}

/// Parse an HTTP response from a get-pet request.
///
/// Returns a result with `data_tag = Pet` on success.
#[unsafe(no_mangle)]
pub extern "C" fn pet_parse_get_pet(
    client: *const FfiPetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPetResult {
    parse_with("pet_parse_get_pet", client, response, |c, r| {
        FfiPetResult::from_pet(c.parse_get_pet(r))
    })
}

/// Parse an HTTP response from a create-pet request.
#[unsafe(no_mangle)]
pub extern "C" fn pet_parse_create_pet(
    client: *const FfiPetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPetResult {
    parse_with("pet_parse_create_pet", client, response, |c, r| {
        FfiPetResult::from_pet(c.parse_create_pet(r))
    })
}

/// Parse an HTTP response from a bulk-create request.
#[unsafe(no_mangle)]
pub extern "C" fn pet_parse_bulk_create_pets(
    client: *const FfiPetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPetResult {
    parse_with("pet_parse_bulk_create_pets", client, response, |c, r| {
        FfiPetResult::from_list(c.parse_bulk_create_pets(r))
    })
}

/// Parse an HTTP response from an update-pet request.
#[unsafe(no_mangle)]
pub extern "C" fn pet_parse_update_pet(
    client: *const FfiPetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPetResult {
    parse_with("pet_parse_update_pet", client, response, |c, r| {
        FfiPetResult::from_pet(c.parse_update_pet(r))
    })
}

/// Parse an HTTP response from a delete-pet request.
///
/// Returns a result with `data_tag = None` on success. Any non-2xx status
/// is an error.
#[unsafe(no_mangle)]
pub extern "C" fn pet_parse_delete_pet(
    client: *const FfiPetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPetResult {
    parse_with("pet_parse_delete_pet", client, response, |c, r| {
        FfiPetResult::from_unit(c.parse_delete_pet(r))
    })
}

/// Parse an HTTP response from either search request.
#[unsafe(no_mangle)]
pub extern "C" fn pet_parse_search_pets(
    client: *const FfiPetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPetResult {
    parse_with("pet_parse_search_pets", client, response, |c, r| {
        FfiPetResult::from_list(c.parse_search_pets(r))
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `pet_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pet_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiPetResult` returned by any `pet_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn pet_free_result(result: *mut FfiPetResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.data.is_null() {
            match result.data_tag {
                FfiDataTag::Pet => {
                    let pet = unsafe { Box::from_raw(result.data as *mut FfiPet) };
                    pet.free_fields();
                }
                FfiDataTag::PetList => {
                    let list = unsafe { Box::from_raw(result.data as *mut FfiPetList) };
                    if !list.items.is_null() && list.len > 0 {
                        let items = unsafe {
                            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                                list.items,
                                list.len as usize,
                            ))
                        };
                        for item in items.iter() {
                            item.free_fields();
                        }
                    }
                }
                FfiDataTag::None => {}
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
