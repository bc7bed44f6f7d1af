//! # 图标光栅化模块
//!
//! ## 设计思路
//!
//! `rasterize` 是严格的两步纯函数：cover 缩放 → 圆形遮罩。
//! 不持有可变共享状态，只读源图，因此各尺寸可以安全地并行执行。
//!
//! ## 实现思路
//!
//! 1. 计算居中正方形裁剪框（边长 = 源图短边），保证无拉伸、无留白
//! 2. 使用 `fast_image_resize` 在裁剪框上直接卷积缩放；失败时回退 `image::imageops`
//! 3. 生成内切圆遮罩并按 destination-in 合成

use fast_image_resize as fr;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, RgbaImage};

use super::mask::{apply_destination_in, circle_mask};
use super::{FaviconError, MaskedIcon, SourceImage};

/// 源图坐标系下的裁剪框。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub left: f64,
    pub top: f64,
    pub side: f64,
}

/// cover 适配：取居中的最大正方形。
pub fn cover_crop_box(width: u32, height: u32) -> CropBox {
    let side = width.min(height) as f64;
    CropBox {
        left: (width as f64 - side) / 2.0,
        top: (height as f64 - side) / 2.0,
        side,
    }
}

/// 将源图处理为 `size`×`size` 的圆形透明图标。
pub fn rasterize(
    source: &SourceImage,
    size: u32,
    filter: FilterType,
) -> Result<MaskedIcon, FaviconError> {
    if size == 0 {
        return Err(FaviconError::InvalidSize {
            size,
            reason: format!("尺寸必须大于 0（源图：{}）", source.path().display()),
        });
    }

    let mut pixels = resize_cover(source, size, filter)?;
    let mask = circle_mask(size);
    apply_destination_in(&mut pixels, &mask);

    log::debug!(
        "🎯 光栅化完成 - 源图: {}x{} 输出: {}x{}",
        source.width(),
        source.height(),
        size,
        size
    );

    Ok(MaskedIcon { size, pixels })
}

/// cover 缩放到 `size`×`size`。
pub fn resize_cover(
    source: &SourceImage,
    size: u32,
    filter: FilterType,
) -> Result<RgbaImage, FaviconError> {
    let crop = cover_crop_box(source.width(), source.height());

    match resize_with_fast_image_resize(source.pixels(), crop, size, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!(
                "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                err
            );
            Ok(resize_with_imageops(source.pixels(), crop, size, filter))
        }
    }
}

fn resize_with_fast_image_resize(
    src: &RgbaImage,
    crop: CropBox,
    size: u32,
    filter: FilterType,
) -> Result<RgbaImage, FaviconError> {
    let (src_width, src_height) = src.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        src.as_raw().clone(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| FaviconError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(size, size, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .crop(crop.left, crop.top, crop.side, crop.side)
        .resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| FaviconError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(size, size, dst_image.into_vec())
        .ok_or_else(|| FaviconError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
}

/// 回退路径：整数像素裁剪后精确缩放。
///
/// 半像素偏移四舍五入到整数像素，裁剪框仍落在源图内。
fn resize_with_imageops(
    src: &RgbaImage,
    crop: CropBox,
    size: u32,
    filter: FilterType,
) -> RgbaImage {
    let side = crop.side as u32;
    let left = crop.left.round() as u32;
    let top = crop.top.round() as u32;
    let cropped = imageops::crop_imm(src, left, top, side, side).to_image();
    imageops::resize(&cropped, size, size, filter)
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favicon::mask::{distance_to_center, ANTIALIAS_EPSILON};
    use proptest::prelude::*;

    /// 左侧红色、右侧蓝色，中间居中 `middle` 宽为绿色的源图。
    fn striped_source(width: u32, height: u32, middle: u32) -> SourceImage {
        let left_edge = (width - middle) / 2;
        let pixels = RgbaImage::from_fn(width, height, |x, _| {
            if x < left_edge {
                Rgba([255, 0, 0, 255])
            } else if x < left_edge + middle {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        SourceImage::from_rgba("striped.png", pixels)
    }

    #[test]
    fn cover_crop_box_centers_landscape_source() {
        let crop = cover_crop_box(512, 300);

        assert_eq!(crop, CropBox { left: 106.0, top: 0.0, side: 300.0 });
    }

    #[test]
    fn cover_crop_box_centers_portrait_source() {
        let crop = cover_crop_box(100, 301);

        assert_eq!(crop, CropBox { left: 0.0, top: 100.5, side: 100.0 });
    }

    #[test]
    fn cover_crop_box_is_identity_for_square_source() {
        assert_eq!(
            cover_crop_box(64, 64),
            CropBox { left: 0.0, top: 0.0, side: 64.0 }
        );
    }

    #[test]
    fn rasterize_rejects_zero_size() {
        let source = SourceImage::from_rgba("a.png", RgbaImage::new(4, 4));

        assert!(matches!(
            rasterize(&source, 0, FilterType::Triangle),
            Err(FaviconError::InvalidSize { size: 0, .. })
        ));
    }

    #[test]
    fn resize_cover_crops_wider_dimension() {
        // 绿色带比裁剪框两侧各宽 20px，覆盖卷积核采样范围
        let source = striped_source(512, 300, 340);

        let resized = resize_cover(&source, 32, FilterType::Triangle).expect("resize failed");

        assert_eq!(resized.dimensions(), (32, 32));
        for pixel in resized.pixels() {
            assert_eq!(pixel, &Rgba([0, 255, 0, 255]));
        }
    }

    #[test]
    fn imageops_fallback_matches_cover_semantics() {
        let source = striped_source(512, 300, 300);
        let crop = cover_crop_box(512, 300);

        let resized = resize_with_imageops(source.pixels(), crop, 16, FilterType::Triangle);

        assert_eq!(resized.dimensions(), (16, 16));
        for pixel in resized.pixels() {
            assert_eq!(pixel, &Rgba([0, 255, 0, 255]));
        }
    }

    #[test]
    fn imageops_fallback_rounds_half_pixel_offset() {
        // 100x301：裁剪框 top = 100.5，取整后应为 101..201 行
        let pixels = RgbaImage::from_fn(100, 301, |_, y| {
            if (101..201).contains(&y) {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([255, 0, 0, 255])
            }
        });
        let crop = cover_crop_box(100, 301);

        let resized = resize_with_imageops(&pixels, crop, 10, FilterType::Triangle);

        assert_eq!(resized.dimensions(), (10, 10));
        for pixel in resized.pixels() {
            assert_eq!(pixel, &Rgba([0, 255, 0, 255]));
        }
    }

    #[test]
    fn rasterize_produces_transparent_corners() {
        let source = SourceImage::from_rgba(
            "opaque.png",
            RgbaImage::from_pixel(64, 40, Rgba([9, 8, 7, 255])),
        );

        let icon = rasterize(&source, 48, FilterType::Triangle).expect("rasterize failed");

        let resized = resize_cover(&source, 48, FilterType::Triangle).expect("resize failed");

        assert_eq!(icon.size(), 48);
        assert_eq!(icon.pixels().get_pixel(0, 0).0[3], 0);
        assert_eq!(icon.pixels().get_pixel(47, 47).0[3], 0);
        assert_eq!(icon.pixels().get_pixel(24, 24), resized.get_pixel(24, 24));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn rasterize_keeps_exact_dimensions_and_circle_alpha(
            size in 1u32..=72,
            width in 1u32..=96,
            height in 1u32..=96,
            color in any::<[u8; 4]>(),
        ) {
            let source = SourceImage::from_rgba(
                "prop.png",
                RgbaImage::from_pixel(width, height, Rgba(color)),
            );

            let resized = resize_cover(&source, size, FilterType::Triangle).unwrap();
            let icon = rasterize(&source, size, FilterType::Triangle).unwrap();
            prop_assert_eq!(icon.pixels().dimensions(), (size, size));

            let radius = size as f64 / 2.0;
            for (x, y, pixel) in icon.pixels().enumerate_pixels() {
                let d = distance_to_center(size, x, y);
                let base = resized.get_pixel(x, y);
                if d >= radius + ANTIALIAS_EPSILON {
                    prop_assert_eq!(pixel.0[3], 0);
                } else if d <= radius - ANTIALIAS_EPSILON {
                    prop_assert_eq!(pixel, base);
                } else {
                    prop_assert!(pixel.0[3] <= base.0[3]);
                    prop_assert_eq!(&pixel.0[..3], &base.0[..3]);
                }
            }
        }
    }
}
