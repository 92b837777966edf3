//! Emission of the GLSL shader pair a GPU host would run for the same
//! transform the CPU engine evaluates. The fragment shader carries the full
//! coordinate-conversion library with an `if`-chain dispatch over the
//! projection selectors, mirroring `remap-core` function for function.
//!
//! The sources are plain Vulkan-flavored GLSL and can be checked without a
//! GPU through naga's GLSL frontend; [`validate_fragment`] and
//! [`validate_vertex`] run parse plus full module validation.

use anyhow::{anyhow, Result};
use naga::front::glsl::{Frontend, Options};
use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::ShaderStage;

/// Full-screen quad vertex shader. Texture-atlas cropping happens in the
/// fragment stage, after the coordinate transform, so the vertex stage is a
/// plain passthrough.
const VERTEX_SHADER: &str = r"#version 450

layout(location = 0) in vec4 vPosition;
layout(location = 1) in vec2 vUV;

layout(location = 0) out vec2 uv;

void main()
{
    gl_Position = vPosition;
    uv = vUV;
}
";

/// Uniform contract and texture bindings.
///
/// `Rotation` holds (pitch, roll, yaw) in radians. `inputFade` is the
/// radial fade pair (inner, outer); (1,1) disables it. `MaxUV` crops a
/// host texture atlas and is applied after the transform so projection
/// seams stay put.
const FRAGMENT_HEADER: &str = r"#version 450

layout(location = 0) in vec2 uv;
layout(location = 0) out vec4 fragColor;

layout(std140, set = 0, binding = 0) uniform ReprojectionParams {
    vec3 Rotation;
    float fovIn;
    float fovOut;
    float sourceAspect;
    float targetAspect;
    int inputProjection;
    int outputProjection;
    int stereoLayout;
    vec2 MaxUV;
    vec2 inputFade;
} params;

layout(set = 1, binding = 0) uniform texture2D InputTexture;
layout(set = 1, binding = 1) uniform sampler InputSampler;
";

/// The coordinate-conversion library, one GLSL function per `remap-core`
/// operation.
const FRAGMENT_LIBRARY: &str = r"
const float PI = 3.141592653589793;

const int EQUI    = 0;
const int FISHEYE = 1;
const int FLAT    = 2;
const int CUBEMAP = 3;

const int STEREO_NONE         = 0;
const int STEREO_OVER_UNDER   = 1;
const int STEREO_SIDE_BY_SIDE = 2;

const vec4 TRANSPARENT_PIXEL = vec4(0.0, 0.0, 0.0, 0.0);
const vec2 SET_TO_TRANSPARENT = vec2(-1.0, -1.0);

// Set when the current pixel has no valid source sample.
bool isTransparent;

// A transformation matrix rotating about the x axis by th radians.
mat3 Rx(float th)
{
    return mat3(1.0, 0.0, 0.0,
                0.0, cos(th), sin(th),
                0.0, -sin(th), cos(th));
}
// A transformation matrix rotating about the y axis by th radians.
mat3 Ry(float th)
{
    return mat3(cos(th), 0.0, -sin(th),
                0.0, 1.0, 0.0,
                sin(th), 0.0, cos(th));
}
// A transformation matrix rotating about the z axis by th radians.
mat3 Rz(float th)
{
    return mat3(cos(th), sin(th), 0.0,
                -sin(th), cos(th), 0.0,
                0.0, 0.0, 1.0);
}

// Rotate a point by th.x about x, then th.y about y, then th.z about z.
vec3 rotatePoint(vec3 p, vec3 th)
{
    return Rx(th.x) * Ry(th.y) * Rz(th.z) * p;
}

// Cartesian direction to (latitude, longitude).
vec2 pointToLatLon(vec3 point)
{
    float r = length(point);
    return vec2(asin(clamp(point.z / r, -1.0, 1.0)), atan(point.x, point.y));
}

// (latitude, longitude) to a direction on the unit sphere.
vec3 latLonToPoint(vec2 latLon)
{
    return vec3(cos(latLon.x) * sin(latLon.y),
                cos(latLon.x) * cos(latLon.y),
                sin(latLon.x));
}

bool outOfBounds(vec2 xy, float lower, float upper)
{
    vec2 lowerBound = vec2(lower, lower);
    vec2 upperBound = vec2(upper, upper);
    return (any(lessThan(xy, lowerBound)) || any(greaterThan(xy, upperBound)));
}

// Equirectangular pixel coordinate to (latitude, longitude).
vec2 equiUvToLatLon(vec2 local_uv)
{
    return vec2(local_uv.y * PI - PI / 2.0,
                local_uv.x * 2.0 * PI - PI);
}

// (latitude, longitude) to an equirectangular pixel coordinate.
vec2 latLonToEquiUv(vec2 latLon)
{
    vec2 local_uv = vec2((latLon.y + PI) / (2.0 * PI), (latLon.x + PI / 2.0) / PI);
    if (outOfBounds(local_uv, 0.0, 1.0)) {
        isTransparent = true;
        return SET_TO_TRANSPARENT;
    }
    return local_uv;
}

// Fisheye pixel coordinate to a direction; the image centre looks forward.
vec3 fisheyeUvToPoint(vec2 local_uv, float fov)
{
    vec2 pos = 2.0 * local_uv - 1.0;
    float r = length(pos);
    if (1.0 < r) {
        isTransparent = true;
        return vec3(0.0, 1.0, 0.0);
    }
    if (r < 1e-7) {
        return vec3(0.0, 1.0, 0.0);
    }
    float psi = (PI / 2.0) * tan(atan(r, 1.0) / fov);
    if (psi >= PI) {
        isTransparent = true;
        return vec3(0.0, 1.0, 0.0);
    }
    vec2 dir = pos / r;
    return vec3(sin(psi) * dir.x, cos(psi), sin(psi) * dir.y);
}

// Direction to a fisheye pixel coordinate; exact inverse of the above.
vec2 pointToFisheyeUv(vec3 point, float fov)
{
    vec2 lateral = vec2(point.x, point.z);
    float len = length(lateral);
    if (len < 1e-7) {
        if (point.y < 0.0) {
            isTransparent = true;
            return SET_TO_TRANSPARENT;
        }
        return vec2(0.5, 0.5);
    }
    float psi = atan(len, point.y);
    float bend = fov * atan(2.0 * psi / PI, 1.0);
    if (bend >= PI / 2.0) {
        isTransparent = true;
        return SET_TO_TRANSPARENT;
    }
    float r = tan(bend);
    if (1.0 < r) {
        isTransparent = true;
        return SET_TO_TRANSPARENT;
    }
    vec2 pos = lateral / len * r;
    return (pos + 1.0) / 2.0;
}

// Flat (pinhole) pixel coordinate to a ray on the image plane.
vec3 flatUvToPoint(vec2 local_uv, float fov, float aspectRatio)
{
    vec2 pos = 2.0 * local_uv - 1.0;
    float halfExtent = tan(fov / 2.0);
    return vec3(pos.x * halfExtent * aspectRatio, 1.0, pos.y * halfExtent);
}

// Ray to a flat pixel coordinate; rays behind the plane are transparent.
vec2 pointToFlatUv(vec3 point, float fov, float aspectRatio)
{
    if (point.y <= 0.0) {
        isTransparent = true;
        return SET_TO_TRANSPARENT;
    }
    float halfExtent = tan(fov / 2.0);
    vec2 xy = vec2(point.x / (point.y * halfExtent * aspectRatio),
                   point.z / (point.y * halfExtent));
    vec2 local_uv = xy / 2.0 + 0.5;
    if (outOfBounds(local_uv, 0.0, 1.0)) {
        isTransparent = true;
        return SET_TO_TRANSPARENT;
    }
    return local_uv;
}

// Cubemap atlas coordinate to a point on the unit cube. The atlas is a 2x3
// cross: columns split at 1/3 and 2/3, rows at 1/2; top row holds the
// left/front/right faces, bottom row up/back/down.
vec3 cubemapUvToPoint(vec2 local_uv)
{
    float leftBoundary = 1.0 / 3.0;
    float rightBoundary = 2.0 / 3.0;
    bool top = local_uv.y >= 0.5;
    int column = 2;
    if (local_uv.x <= leftBoundary) {
        column = 0;
    } else if (local_uv.x <= rightBoundary) {
        column = 1;
    }
    float u_local = (local_uv.x - float(column) / 3.0) * 3.0;
    float v_local = local_uv.y * 2.0;
    if (top) {
        v_local = (local_uv.y - 0.5) * 2.0;
    }
    float lx = 2.0 * u_local - 1.0;
    float ly = 2.0 * v_local - 1.0;
    if (top) {
        if (column == 0) {
            return vec3(-1.0, lx, ly);
        }
        if (column == 1) {
            return vec3(lx, 1.0, ly);
        }
        return vec3(1.0, -lx, ly);
    }
    if (column == 0) {
        return vec3(-ly, -lx, 1.0);
    }
    if (column == 1) {
        return vec3(-ly, -1.0, -lx);
    }
    return vec3(-ly, lx, -1.0);
}

// Direction to the atlas coordinate of the face it pierces; total.
vec2 pointToCubemapUv(vec3 point)
{
    vec3 a = abs(point);
    float lx = 0.0;
    float ly = 0.0;
    float column = 0.0;
    float rowOffset = 0.0;
    if (a.x >= a.y && a.x >= a.z) {
        vec3 q = point / a.x;
        ly = q.z;
        rowOffset = 0.5;
        if (point.x >= 0.0) {
            lx = -q.y;
            column = 2.0;
        } else {
            lx = q.y;
            column = 0.0;
        }
    } else if (a.y >= a.z) {
        vec3 q = point / a.y;
        column = 1.0;
        if (point.y >= 0.0) {
            lx = q.x;
            ly = q.z;
            rowOffset = 0.5;
        } else {
            lx = -q.z;
            ly = -q.x;
            rowOffset = 0.0;
        }
    } else {
        vec3 q = point / a.z;
        ly = -q.x;
        rowOffset = 0.0;
        if (point.z >= 0.0) {
            lx = -q.y;
            column = 0.0;
        } else {
            lx = q.y;
            column = 2.0;
        }
    }
    return vec2((lx + 1.0) / 6.0 + column / 3.0, (ly + 1.0) / 4.0 + rowOffset);
}

// Radial fade over the source fisheye radius; (1,1) is fully opaque.
float fadeCoefficient(float r)
{
    if (r <= params.inputFade.x) {
        return 1.0;
    }
    if (r >= params.inputFade.y) {
        return 0.0;
    }
    return (params.inputFade.y - r) / (params.inputFade.y - params.inputFade.x);
}
";

/// The per-pixel entry point: stereo fold, destination lift, rotation,
/// source projection, stereo unfold, atlas crop, sample.
const FRAGMENT_MAIN: &str = r"
void main()
{
    isTransparent = false;
    vec2 local_uv = uv;
    bool stereoSecondHalf = false;
    if (params.stereoLayout == STEREO_OVER_UNDER) {
        if (local_uv.y <= 0.5) {
            local_uv.y = local_uv.y * 2.0;
        } else {
            local_uv.y = (local_uv.y - 0.5) * 2.0;
            stereoSecondHalf = true;
        }
    }
    if (params.stereoLayout == STEREO_SIDE_BY_SIDE) {
        if (local_uv.x <= 0.5) {
            local_uv.x = local_uv.x * 2.0;
        } else {
            local_uv.x = (local_uv.x - 0.5) * 2.0;
            stereoSecondHalf = true;
        }
    }

    vec3 point;
    if (params.outputProjection == EQUI) {
        point = latLonToPoint(equiUvToLatLon(local_uv));
    } else if (params.outputProjection == FISHEYE) {
        point = fisheyeUvToPoint(local_uv, params.fovOut);
    } else if (params.outputProjection == FLAT) {
        point = flatUvToPoint(local_uv, params.fovOut, params.targetAspect);
    } else {
        point = cubemapUvToPoint(local_uv);
    }
    if (isTransparent) {
        fragColor = TRANSPARENT_PIXEL;
        return;
    }

    point = rotatePoint(point, params.Rotation);

    vec2 sourcePixel;
    float fade = 1.0;
    if (params.inputProjection == EQUI) {
        sourcePixel = latLonToEquiUv(pointToLatLon(point));
    } else if (params.inputProjection == FISHEYE) {
        sourcePixel = pointToFisheyeUv(point, params.fovIn);
        fade = fadeCoefficient(length(2.0 * sourcePixel - 1.0));
    } else if (params.inputProjection == FLAT) {
        sourcePixel = pointToFlatUv(point, params.fovIn, params.sourceAspect);
    } else {
        sourcePixel = pointToCubemapUv(point);
    }
    if (isTransparent) {
        fragColor = TRANSPARENT_PIXEL;
        return;
    }

    if (params.stereoLayout == STEREO_OVER_UNDER) {
        sourcePixel.y = sourcePixel.y / 2.0;
        if (stereoSecondHalf) {
            sourcePixel.y = sourcePixel.y + 0.5;
        }
    } else if (params.stereoLayout == STEREO_SIDE_BY_SIDE) {
        sourcePixel.x = sourcePixel.x / 2.0;
        if (stereoSecondHalf) {
            sourcePixel.x = sourcePixel.x + 0.5;
        }
    }

    // Cropping after the transform keeps the seam out of the image.
    sourcePixel = sourcePixel * params.MaxUV;
    // The texture is premultiplied; the fade scales every channel alike.
    fragColor = fade * texture(sampler2D(InputTexture, InputSampler), sourcePixel);
}
";

/// The full-screen quad vertex shader source.
pub fn vertex_source() -> &'static str {
    VERTEX_SHADER
}

/// The consolidated re-projection fragment shader source.
pub fn fragment_source() -> String {
    format!("{FRAGMENT_HEADER}{FRAGMENT_LIBRARY}{FRAGMENT_MAIN}")
}

fn validate(source: &str, stage: ShaderStage, label: &str) -> Result<()> {
    let mut frontend = Frontend::default();
    let module = frontend
        .parse(&Options::from(stage), source)
        .map_err(|errors| anyhow!("{label} shader failed to parse: {errors:?}"))?;
    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|error| anyhow!("{label} shader failed validation: {error:?}"))?;
    Ok(())
}

/// Parses and validates the emitted fragment shader through naga.
pub fn validate_fragment() -> Result<()> {
    validate(&fragment_source(), ShaderStage::Fragment, "fragment")
}

/// Parses and validates the emitted vertex shader through naga.
pub fn validate_vertex() -> Result<()> {
    validate(VERTEX_SHADER, ShaderStage::Vertex, "vertex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_declares_the_uniform_contract() {
        let source = fragment_source();
        for needle in [
            "uniform ReprojectionParams",
            "vec3 Rotation;",
            "float fovIn;",
            "float fovOut;",
            "int inputProjection;",
            "int outputProjection;",
            "int stereoLayout;",
            "vec2 MaxUV;",
            "uniform texture2D InputTexture;",
        ] {
            assert!(source.contains(needle), "missing '{needle}'");
        }
    }

    #[test]
    fn fragment_routes_every_projection() {
        let source = fragment_source();
        for needle in [
            "equiUvToLatLon",
            "fisheyeUvToPoint",
            "flatUvToPoint",
            "cubemapUvToPoint",
            "latLonToEquiUv",
            "pointToFisheyeUv",
            "pointToFlatUv",
            "pointToCubemapUv",
        ] {
            assert!(source.contains(needle), "missing '{needle}'");
        }
    }

    #[test]
    fn emitted_shaders_pass_naga_validation() {
        validate_vertex().expect("vertex shader validates");
        validate_fragment().expect("fragment shader validates");
    }

    #[test]
    fn broken_glsl_is_rejected() {
        let truncated = &fragment_source()[..200];
        assert!(validate(truncated, ShaderStage::Fragment, "fragment").is_err());
    }
}
