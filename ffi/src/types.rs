//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`,
//! `has_id` + `id` instead of `Option<i64>`, and tagged enums with explicit
//! discriminants. Conversion functions live here to keep `lib.rs` focused on
//! the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use pet_core::{ApiError, Gender, HttpMethod, Pet};

/// Opaque handle to a `PetClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiPetClient {
    pub(crate) inner: pet_core::PetClient,
}

/// Copy `s` into a heap C string owned by the caller. Interior NULs are dropped.
pub(crate) fn c_string(s: String) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

/// Read a caller-owned C string. Null and invalid UTF-8 read as empty.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn read_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .unwrap_or("")
        .to_string()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `pet_build_*` functions. The C caller executes the request
/// and passes the response back through `pet_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: pet_core::HttpRequest) -> *mut Self {
        let path = c_string(req.path);
        let body = match req.body {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Caller-provided inputs (not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `pet_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

/// Pet gender as a C enum.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FfiGender {
    Male = 0,
    Female = 1,
}

impl From<Gender> for FfiGender {
    fn from(g: Gender) -> Self {
        match g {
            Gender::Male => FfiGender::Male,
            Gender::Female => FfiGender::Female,
        }
    }
}

impl From<FfiGender> for Gender {
    fn from(g: FfiGender) -> Self {
        match g {
            FfiGender::Male => Gender::Male,
            FfiGender::Female => Gender::Female,
        }
    }
}

/// A pet record supplied by the C caller. Null strings read as empty.
#[repr(C)]
pub struct FfiPetInput {
    pub has_id: bool,
    pub id: i64,
    pub name: *const c_char,
    pub species: *const c_char,
    pub breed: *const c_char,
    pub gender: FfiGender,
    pub image: *const c_char,
    pub description: *const c_char,
    pub price: f64,
}

impl FfiPetInput {
    /// # Safety
    /// Every non-null string field must point to a NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> Pet {
        unsafe {
            Pet {
                id: self.has_id.then_some(self.id),
                name: read_str(self.name),
                species: read_str(self.species),
                breed: read_str(self.breed),
                gender: self.gender.into(),
                image: read_str(self.image),
                description: read_str(self.description),
                price: self.price,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiPetResult`.
#[repr(C)]
#[derive(Debug)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    Transport = 5,
    MissingId = 6,
    Panic = 7,
    NullArg = 8,
}

/// Tag that tells `pet_free_result` what `FfiPetResult::data` points to.
#[repr(C)]
#[derive(Debug)]
pub enum FfiDataTag {
    None = 0,
    Pet = 1,
    PetList = 2,
}

/// A single pet exposed to C.
#[repr(C)]
pub struct FfiPet {
    pub has_id: bool,
    pub id: i64,
    pub name: *mut c_char,
    pub species: *mut c_char,
    pub breed: *mut c_char,
    pub gender: FfiGender,
    pub image: *mut c_char,
    pub description: *mut c_char,
    pub price: f64,
}

impl FfiPet {
    fn from_core(pet: Pet) -> Self {
        FfiPet {
            has_id: pet.id.is_some(),
            id: pet.id.unwrap_or_default(),
            name: c_string(pet.name),
            species: c_string(pet.species),
            breed: c_string(pet.breed),
            gender: pet.gender.into(),
            image: c_string(pet.image),
            description: c_string(pet.description),
            price: pet.price,
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        for field in [
            self.name,
            self.species,
            self.breed,
            self.image,
            self.description,
        ] {
            if !field.is_null() {
                drop(unsafe { CString::from_raw(field) });
            }
        }
    }
}

/// A list of pets exposed to C.
#[repr(C)]
pub struct FfiPetList {
    pub items: *mut FfiPet,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiPetResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiPetResult {
    fn ok(data_tag: FfiDataTag, data: *mut std::ffi::c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiPetResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiPetResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Envelope a single-pet parse outcome.
    pub(crate) fn from_pet(result: Result<Pet, ApiError>) -> *mut Self {
        match result {
            Ok(pet) => {
                let ffi_pet = Box::new(FfiPet::from_core(pet));
                Self::ok(FfiDataTag::Pet, Box::into_raw(ffi_pet) as *mut std::ffi::c_void)
            }
            Err(e) => Self::from_error(e),
        }
    }

    /// Envelope a pet-list parse outcome.
    pub(crate) fn from_list(result: Result<Vec<Pet>, ApiError>) -> *mut Self {
        match result {
            Ok(pets) => {
                let len = pets.len() as u32;
                let items = if pets.is_empty() {
                    std::ptr::null_mut()
                } else {
                    let ffi_pets: Box<[FfiPet]> = pets.into_iter().map(FfiPet::from_core).collect();
                    Box::into_raw(ffi_pets) as *mut FfiPet
                };
                let ffi_list = Box::new(FfiPetList { items, len });
                Self::ok(
                    FfiDataTag::PetList,
                    Box::into_raw(ffi_list) as *mut std::ffi::c_void,
                )
            }
            Err(e) => Self::from_error(e),
        }
    }

    /// Envelope an outcome with no payload (e.g. delete).
    pub(crate) fn from_unit(result: Result<(), ApiError>) -> *mut Self {
        match result {
            Ok(()) => Self::ok(FfiDataTag::None, std::ptr::null_mut()),
            Err(e) => Self::from_error(e),
        }
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404u16),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
            ApiError::MissingId => (FfiErrorCode::MissingId, 0),
        };
        Self::err(error_code, http_status, err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
