//! # 圆形遮罩模块
//!
//! ## 设计思路
//!
//! 直接按几何计算每个像素被内切圆覆盖的比例，生成灰度遮罩，
//! 不依赖任何矢量光栅化器，边界像素的 alpha 值可精确断言。
//!
//! ## 实现思路
//!
//! - 以像素中心 `(x + 0.5, y + 0.5)` 采样，圆心 `(n/2, n/2)`，半径 `n/2`。
//! - 覆盖率 `clamp(r - d + 0.5, 0, 1)`：`d <= r - 0.5` 完全覆盖，`d >= r + 0.5` 完全透明，
//!   中间一像素宽的过渡带即抗锯齿边缘。
//! - 合成采用 destination-in：输出 alpha = 原 alpha × 遮罩 alpha，颜色通道不变。

use image::{GrayImage, Luma, RgbaImage};

/// 抗锯齿过渡带半宽（像素）。
pub const ANTIALIAS_EPSILON: f64 = 0.5;

/// 像素中心到圆心的距离。
pub fn distance_to_center(size: u32, x: u32, y: u32) -> f64 {
    let center = size as f64 / 2.0;
    let dx = x as f64 + 0.5 - center;
    let dy = y as f64 + 0.5 - center;
    (dx * dx + dy * dy).sqrt()
}

/// 单个像素的圆形覆盖率，取值 0..=255。
pub fn coverage(size: u32, x: u32, y: u32) -> u8 {
    let radius = size as f64 / 2.0;
    let d = distance_to_center(size, x, y);

    if d <= radius - ANTIALIAS_EPSILON {
        return u8::MAX;
    }
    if d >= radius + ANTIALIAS_EPSILON {
        return 0;
    }

    let ratio = (radius - d + ANTIALIAS_EPSILON).clamp(0.0, 1.0);
    (ratio * 255.0).round() as u8
}

/// 生成边长为 `size` 的内切圆遮罩。
pub fn circle_mask(size: u32) -> GrayImage {
    GrayImage::from_fn(size, size, |x, y| Luma([coverage(size, x, y)]))
}

/// destination-in 合成：按遮罩缩放 alpha，颜色不变。
///
/// 遮罩尺寸必须与图像一致，由调用方保证。
pub fn apply_destination_in(image: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(image.dimensions(), mask.dimensions());

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let m = mask.get_pixel(x, y).0[0];
        pixel.0[3] = scale_alpha(pixel.0[3], m);
    }
}

fn scale_alpha(alpha: u8, mask: u8) -> u8 {
    match mask {
        u8::MAX => alpha,
        0 => 0,
        m => ((alpha as u32 * m as u32 + 127) / 255) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn corners_are_transparent_and_center_is_opaque() {
        let mask = circle_mask(16);

        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(15, 0).0[0], 0);
        assert_eq!(mask.get_pixel(0, 15).0[0], 0);
        assert_eq!(mask.get_pixel(15, 15).0[0], 0);
        assert_eq!(mask.get_pixel(7, 7).0[0], 255);
        assert_eq!(mask.get_pixel(8, 8).0[0], 255);
    }

    #[test]
    fn mask_is_symmetric() {
        let size = 17;
        let mask = circle_mask(size);

        for y in 0..size {
            for x in 0..size {
                let v = mask.get_pixel(x, y).0[0];
                assert_eq!(v, mask.get_pixel(size - 1 - x, y).0[0]);
                assert_eq!(v, mask.get_pixel(x, size - 1 - y).0[0]);
                assert_eq!(v, mask.get_pixel(y, x).0[0]);
            }
        }
    }

    #[test]
    fn edge_midpoint_is_partially_covered() {
        // 16px：像素 (0, 7) 中心距圆心 sqrt(7.5² + 0.5²) ≈ 7.5166，覆盖率 ≈ 0.983
        let value = coverage(16, 0, 7);

        assert!(value > 200 && value < 255, "value = {}", value);
    }

    #[test]
    fn single_pixel_icon_is_fully_covered() {
        // 1px：像素中心即圆心
        assert_eq!(coverage(1, 0, 0), 255);
    }

    #[test]
    fn destination_in_keeps_color_and_scales_alpha() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([200, 100, 50, 200]));
        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(0, 0, Luma([255]));
        mask.put_pixel(1, 0, Luma([128]));

        apply_destination_in(&mut image, &mask);

        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 100, 50, 200]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([200, 100, 50, 100]));
    }

    #[test]
    fn scale_alpha_is_exact_at_extremes() {
        for a in 0..=255u8 {
            assert_eq!(scale_alpha(a, 255), a);
            assert_eq!(scale_alpha(a, 0), 0);
        }
        assert_eq!(scale_alpha(255, 128), 128);
    }
}
