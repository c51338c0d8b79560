use image::{Rgb, RgbImage};

fn main() {
    let mut img = RgbImage::new(800, 600);

    // Dark background with three light objects of known pixel size.
    for p in img.pixels_mut() {
        *p = Rgb([30, 30, 30]);
    }
    for &(rx, ry, rw, rh) in &[(100u32, 100u32, 200u32, 120u32), (400, 150, 85, 54), (200, 350, 300, 100)] {
        for y in ry..ry + rh {
            for x in rx..rx + rw {
                img.put_pixel(x, y, Rgb([230, 230, 230]));
            }
        }
    }

    img.save("test_image.png").unwrap();
    println!("Created test_image.png (800x600, three rectangles)");
}
